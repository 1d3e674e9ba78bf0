// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Read a sample table and extract its waveform in a single call.

use crate::{extract, LoadOptions, Result, SampleTable, Waveform};
use std::io::Read;

/// Read a CSV file with the default options.
pub fn read<P: AsRef<std::path::Path>>(filename: P) -> Result<Waveform> {
    read_with_options(filename, &LoadOptions::default())
}

pub fn read_with_options<P: AsRef<std::path::Path>>(
    filename: P,
    options: &LoadOptions,
) -> Result<Waveform> {
    let filename = filename.as_ref();
    log::info!("reading samples from {}", filename.display());
    let table = SampleTable::open(filename, options)?;
    read_table(table)
}

/// Read from something that is not a file.
pub fn read_from_reader<R: Read>(input: R, options: &LoadOptions) -> Result<Waveform> {
    let table = SampleTable::from_reader(input, options)?;
    read_table(table)
}

fn read_table<R: Read>(mut table: SampleTable<R>) -> Result<Waveform> {
    let header = table.header().clone();
    extract(&header, table.records())
}
