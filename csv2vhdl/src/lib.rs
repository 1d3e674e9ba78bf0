// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// VHDL testbench that replays a captured waveform.

mod identifier;

pub use identifier::{is_basic_identifier, to_identifier, unique_identifiers};

use csvwave::{Delay, TimeUnit, Waveform};
use identifier::VALUES_SUFFIX;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// The nine valued logic type from `ieee.std_logic_1164`.
pub const DEFAULT_SIGNAL_TYPE: &str = "std_logic";

/// Element of the `others` choice in value arrays over a null range.
const NULL_VALUE: &str = "'0'";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestbenchOptions {
    /// When set, the stimulus process is wrapped in an entity and architecture of this name.
    pub entity: Option<String>,
    /// Type of the generated signal declarations and of the value arrays.
    pub signal_type: String,
    /// Unit of the delay literals.
    pub time_unit: TimeUnit,
    /// Name of the capture, only used in the header comment.
    pub source: Option<String>,
}

impl Default for TestbenchOptions {
    fn default() -> Self {
        Self {
            entity: None,
            signal_type: DEFAULT_SIGNAL_TYPE.to_string(),
            time_unit: TimeUnit::default(),
            source: None,
        }
    }
}

/// Renders through its `Display` implementation.
pub struct Testbench<'a> {
    waveform: &'a Waveform,
    options: &'a TestbenchOptions,
    identifiers: Vec<String>,
}

impl<'a> Testbench<'a> {
    pub fn new(waveform: &'a Waveform, options: &'a TestbenchOptions) -> Self {
        if let Some(entity) = &options.entity {
            if !is_basic_identifier(entity) {
                log::warn!("entity name `{entity}` is not a valid VHDL identifier");
            }
        }
        let mut declared = vec![options.signal_type.as_str()];
        declared.extend(options.entity.as_deref());
        let identifiers = unique_identifiers(waveform.signal_names(), &declared);
        Testbench {
            waveform,
            options,
            identifiers,
        }
    }

    /// VHDL names of the signals, in the same order as `Waveform::signal_names`.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    fn write_header(&self, f: &mut Formatter<'_>, entity: &str) -> std::fmt::Result {
        write!(f, "-- Testbench generated by csv2vhdl {}", env!("CARGO_PKG_VERSION"))?;
        if let Some(source) = &self.options.source {
            write!(f, " from {source}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "-- total duration:       {}",
            statistic(self.waveform.total_duration())
        )?;
        writeln!(
            f,
            "-- minimum sample delay: {}",
            statistic(self.waveform.min_positive_delay())
        )?;
        writeln!(f)?;
        writeln!(f, "library ieee;")?;
        writeln!(f, "use ieee.std_logic_1164.all;")?;
        writeln!(f)?;
        writeln!(f, "entity {entity} is")?;
        writeln!(f, "end entity {entity};")?;
        writeln!(f)?;
        writeln!(f, "architecture sim of {entity} is")?;
        for id in self.identifiers.iter() {
            writeln!(f, "    signal {id} : {};", self.options.signal_type)?;
        }
        writeln!(f, "begin")?;
        writeln!(f)
    }

    fn write_stimulus(&self, f: &mut Formatter<'_>, indent: &str) -> std::fmt::Result {
        let len = self.waveform.len();
        writeln!(f, "{indent}stimulus : process")?;
        writeln!(
            f,
            "{indent}    type time_array is array (natural range <>) of time;"
        )?;
        if !self.identifiers.is_empty() {
            writeln!(
                f,
                "{indent}    type value_array is array (natural range <>) of {};",
                self.options.signal_type
            )?;
        }
        let unit = self.options.time_unit;
        let delays = self
            .waveform
            .delays()
            .iter()
            .map(|d| delay_literal(*d, unit));
        let null_delay = format!("0 {unit}");
        write_constant(f, indent, "DELAYS", "time_array", len, delays, &null_delay)?;
        for (id, values) in self.identifiers.iter().zip(self.waveform.signals().values()) {
            let name = format!("{id}{VALUES_SUFFIX}");
            let literals = values.iter().map(|v| value_literal(v));
            write_constant(f, indent, &name, "value_array", len, literals, NULL_VALUE)?;
        }
        writeln!(f, "{indent}begin")?;
        writeln!(f, "{indent}    for i in DELAYS'range loop")?;
        writeln!(f, "{indent}        wait for DELAYS(i);")?;
        for id in self.identifiers.iter() {
            writeln!(f, "{indent}        {id} <= {id}{VALUES_SUFFIX}(i);")?;
        }
        writeln!(f, "{indent}    end loop;")?;
        writeln!(f, "{indent}    wait;")?;
        writeln!(f, "{indent}end process stimulus;")
    }
}

impl Display for Testbench<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.options.entity {
            Some(entity) => {
                self.write_header(f, entity)?;
                self.write_stimulus(f, "    ")?;
                writeln!(f)?;
                writeln!(f, "end architecture sim;")
            }
            None => self.write_stimulus(f, ""),
        }
    }
}

/// Renders the complete testbench into a string.
pub fn render(waveform: &Waveform, options: &TestbenchOptions) -> String {
    Testbench::new(waveform, options).to_string()
}

/// `constant <name> : <tpe>(0 to <len - 1>) := (...);` with one element per line.
/// Without elements the range is null and `null_element` fills the `others` choice.
fn write_constant(
    f: &mut Formatter<'_>,
    indent: &str,
    name: &str,
    tpe: &str,
    len: usize,
    mut elements: impl Iterator<Item = String>,
    null_element: &str,
) -> std::fmt::Result {
    let Some(last) = len.checked_sub(1) else {
        return writeln!(
            f,
            "{indent}    constant {name} : {tpe}(0 to -1) := (others => {null_element});"
        );
    };
    write!(f, "{indent}    constant {name} : {tpe}(0 to {last}) := ")?;
    if len == 1 {
        // positional aggregates need at least two elements
        let element = elements.next().unwrap_or_default();
        return writeln!(f, "(0 => {element});");
    }
    writeln!(f, "(")?;
    let separator = format!(",\n{indent}        ");
    writeln!(f, "{indent}        {}", elements.join(&separator))?;
    writeln!(f, "{indent}    );")
}

/// Real literal in VHDL syntax, which requires a decimal point.
pub fn real_literal(value: f64) -> String {
    // `Display` for f64 never uses an exponent
    let mut out = format!("{value}");
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

pub fn delay_literal(delay: Delay, unit: TimeUnit) -> String {
    format!("{} {unit}", real_literal(delay.value_in(unit)))
}

/// Single characters become character literals, everything else a string literal.
pub fn value_literal(value: &str) -> String {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => format!("'{c}'"),
        _ => format!("\"{}\"", value.replace('"', "\"\"")),
    }
}

/// Seconds with three significant digits in scientific notation, e.g. `2.50e-1 sec`.
fn statistic(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2e} sec")
    } else {
        "none".to_string()
    }
}
