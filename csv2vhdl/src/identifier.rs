// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Mapping of arbitrary column names onto VHDL basic identifiers.

use rustc_hash::FxHashSet;

/// VHDL-2008 reserved words.
const RESERVED: &[&str] = &[
    "abs", "access", "after", "alias", "all", "and", "architecture", "array", "assert",
    "assume", "assume_guarantee", "attribute", "begin", "block", "body", "buffer", "bus",
    "case", "component", "configuration", "constant", "context", "cover", "default",
    "disconnect", "downto", "else", "elsif", "end", "entity", "exit", "fairness", "file", "for",
    "force", "function", "generate", "generic", "group", "guarded", "if", "impure", "in",
    "inertial", "inout", "is", "label", "library", "linkage", "literal", "loop", "map", "mod",
    "nand", "new", "next", "nor", "not", "null", "of", "on", "open", "or", "others", "out",
    "package", "parameter", "port", "postponed", "procedure", "process", "property",
    "protected", "pure", "range", "record", "register", "reject", "release", "rem", "report",
    "restrict", "restrict_guarantee", "return", "rol", "ror", "select", "sequence", "severity",
    "shared", "signal", "sla", "sll", "sra", "srl", "strong", "subtype", "then", "to",
    "transport", "type", "unaffected", "units", "until", "use", "variable", "vmode", "vprop",
    "vunit", "wait", "when", "while", "with", "xnor", "xor",
];

/// Names the generated testbench declares or relies on. Signals must not hide them.
const TESTBENCH_NAMES: &[&str] = &[
    "delays",
    "time_array",
    "value_array",
    "stimulus",
    "sim",
    "i",
    "ieee",
    "std",
    "std_logic_1164",
    "time",
    "natural",
    "fs",
    "ps",
    "ns",
    "us",
    "ms",
    "sec",
];

/// Suffix of the constant that holds the values of a signal.
pub(crate) const VALUES_SUFFIX: &str = "_VALUES";

pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RESERVED.contains(&lower.as_str())
}

/// A letter followed by letters, digits and single, non-trailing underscores.
pub fn is_basic_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    let Some(first) = bytes.first() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        && !name.contains("__")
        && !name.ends_with('_')
        && !is_reserved(name)
}

/// Turns `name` into a basic identifier, e.g. `Channel 0` into `Channel_0`.
pub fn to_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.insert_str(0, "s_");
        // an empty name would leave a trailing underscore
        if out.len() == 2 {
            out.pop();
        }
    }
    if is_reserved(&out) {
        out.push_str("_s");
    }
    out
}

/// Identifiers for all `names`, in order. VHDL is case insensitive, thus two names that only
/// differ in case get different identifiers. None of them matches one of the `declared` names,
/// e.g. the signal type or the entity.
pub fn unique_identifiers<'a>(
    names: impl IntoIterator<Item = &'a str>,
    declared: &[&str],
) -> Vec<String> {
    let mut taken: FxHashSet<String> = TESTBENCH_NAMES
        .iter()
        .chain(declared.iter())
        .map(|n| n.to_ascii_lowercase())
        .collect();
    let mut out = Vec::new();
    for name in names {
        let base = to_identifier(name);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !is_free(&taken, &candidate) {
            suffix += 1;
            candidate = format!("{base}_{suffix}");
        }
        taken.insert(candidate.to_ascii_lowercase());
        taken.insert(format!("{candidate}{VALUES_SUFFIX}").to_ascii_lowercase());
        if candidate != name {
            log::info!("column `{name}` is declared as `{candidate}`");
        }
        out.push(candidate);
    }
    out
}

fn is_free(taken: &FxHashSet<String>, candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    let values = format!("{lower}{VALUES_SUFFIX}").to_ascii_lowercase();
    !taken.contains(&lower) && !taken.contains(&values)
}
