// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Reads the header and records of a delimited sample table.

use crate::{CsvWaveError, LoadOptions, Result};
use csv::StringRecord;
use rustc_hash::FxHashSet;
use std::io::Read;

impl From<csv::Error> for CsvWaveError {
    fn from(value: csv::Error) -> Self {
        if value.is_io_error() {
            return CsvWaveError::Io(value.into());
        }
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = value.kind()
        {
            return CsvWaveError::MalformedRow {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len,
                found: *len,
            };
        }
        CsvWaveError::Csv(value)
    }
}

/// Column names of a sample table. Exactly one of them holds the timestamps,
/// all others are signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    time_index: usize,
}

impl Header {
    pub fn new<I, S>(columns: I, time_column: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .collect();
        let mut seen = FxHashSet::default();
        for name in columns.iter() {
            if !seen.insert(name.as_str()) {
                return Err(CsvWaveError::DuplicateColumn(name.clone()));
            }
        }
        let time_index = columns
            .iter()
            .position(|c| c == time_column.trim())
            .ok_or_else(|| CsvWaveError::MissingTimeColumn(time_column.to_string()))?;
        Ok(Header {
            columns,
            time_index,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn time_index(&self) -> usize {
        self.time_index
    }

    pub fn time_column(&self) -> &str {
        &self.columns[self.time_index]
    }

    /// All columns except for the time column, in header order.
    pub fn signal_columns(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(ii, _)| *ii != self.time_index)
            .map(|(ii, name)| (ii, name.as_str()))
    }
}

/// A delimited table whose header has already been read.
pub struct SampleTable<R: Read> {
    reader: csv::Reader<R>,
    header: Header,
}

impl<R: Read> std::fmt::Debug for SampleTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SampleTable({:?})", self.header.columns)
    }
}

impl SampleTable<std::fs::File> {
    pub fn open<P: AsRef<std::path::Path>>(filename: P, options: &LoadOptions) -> Result<Self> {
        let path = filename.as_ref();
        let input = std::fs::File::open(path).map_err(|source| CsvWaveError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(input, options)
    }
}

impl<R: Read> SampleTable<R> {
    /// Reads the header from `input`. Records are only read on demand.
    pub fn from_reader(input: R, options: &LoadOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(input);
        let header = Header::new(reader.headers()?.iter(), &options.time_column)?;
        log::debug!(
            "header: time column `{}` at index {}, {} signal columns",
            header.time_column(),
            header.time_index(),
            header.len() - 1
        );
        Ok(SampleTable { reader, header })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Records in the order in which they appear in the input.
    pub fn records(&mut self) -> impl Iterator<Item = Result<StringRecord>> + '_ {
        self.reader
            .records()
            .map(|r| r.map_err(CsvWaveError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(input: &str) -> Result<SampleTable<&[u8]>> {
        SampleTable::from_reader(input.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn test_header() {
        let h = Header::new(["A", "Time[s]", " B "], "Time[s]").unwrap();
        assert_eq!(h.time_index(), 1);
        assert_eq!(h.time_column(), "Time[s]");
        assert_eq!(h.len(), 3);
        let signals: Vec<_> = h.signal_columns().collect();
        assert_eq!(signals, [(0, "A"), (2, "B")]);
    }

    #[test]
    fn test_missing_time_column() {
        let err = Header::new(["Time", "A"], "Time[s]").unwrap_err();
        assert!(matches!(err, CsvWaveError::MissingTimeColumn(name) if name == "Time[s]"));
        // an empty file has no header at all
        assert!(matches!(
            table("").unwrap_err(),
            CsvWaveError::MissingTimeColumn(_)
        ));
    }

    #[test]
    fn test_duplicate_column() {
        let err = Header::new(["Time[s]", "A", "A"], "Time[s]").unwrap_err();
        assert!(matches!(err, CsvWaveError::DuplicateColumn(name) if name == "A"));
    }

    #[test]
    fn test_read_records() {
        let mut t = table("Time[s],A,B\n0.0,0,1\n0.5,1,1\n").unwrap();
        assert_eq!(t.header().columns(), ["Time[s]", "A", "B"]);
        let records: Vec<StringRecord> = t.records().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][0], "0.5");
        assert_eq!(records[1].position().unwrap().line(), 3);
    }

    #[test]
    fn test_unequal_row_is_malformed() {
        let mut t = table("Time[s],A,B\n0.0,0,1\n0.5,1\n").unwrap();
        let results: Vec<_> = t.records().collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(CsvWaveError::MalformedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(*line, 3);
                assert_eq!(*expected, 3);
                assert_eq!(*found, 2);
            }
            other => panic!("expected a malformed row, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiter_and_time_column() {
        let options = LoadOptions {
            time_column: "t".to_string(),
            delimiter: b';',
        };
        let mut t = SampleTable::from_reader("A;t\n1;0.25\n".as_bytes(), &options).unwrap();
        assert_eq!(t.header().time_index(), 1);
        let record = t.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "0.25");
    }
}
