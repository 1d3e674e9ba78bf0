// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

mod extract;
pub mod simple;
pub mod table;
mod units;

/// Cargo.toml version of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the time column exported by most logic analyzer front ends.
pub const DEFAULT_TIME_COLUMN: &str = "Time[s]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Header of the column that holds the sample timestamps in seconds.
    pub time_column: String,
    /// Field delimiter, `b','` for comma separated values.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            delimiter: b',',
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CsvWaveError {
    #[error("failed to open {path:?}")]
    InputNotFound {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected {expected} columns, found {found}")]
    MalformedRow { line: u64, expected: u64, found: u64 },
    #[error("no `{0}` column in the header")]
    MissingTimeColumn(String),
    #[error("column `{0}` appears more than once in the header")]
    DuplicateColumn(String),
    #[error("line {line}: invalid timestamp `{value}`")]
    InvalidTimestamp { line: u64, value: String },
    #[error("failed to read table")]
    Csv(#[source] csv::Error),
    #[error("io error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CsvWaveError>;

pub use extract::{extract, RunningTimeState, SignalMap, Waveform};
pub use table::{Header, SampleTable};
pub use units::{Delay, TimeUnit, UnknownTimeUnit};
