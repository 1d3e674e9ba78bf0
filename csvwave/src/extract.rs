// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Turns a sequence of sample records into delays between samples and per-signal values.

use crate::table::Header;
use crate::{CsvWaveError, Delay, Result};
use csv::StringRecord;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Signal name to the values it took in every sample, in header order.
pub type SignalMap = IndexMap<String, Vec<String>, FxBuildHasher>;

/// Scalars threaded through the scan over all samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningTimeState {
    last_sample_time: f64,
    least_sample_difference: f64,
    runtime_duration: f64,
}

impl Default for RunningTimeState {
    fn default() -> Self {
        Self {
            last_sample_time: 0.0,
            least_sample_difference: f64::INFINITY,
            runtime_duration: 0.0,
        }
    }
}

impl RunningTimeState {
    /// Accounts for a sample taken at `time` and returns the delay since the previous sample.
    /// A timestamp that lies before the previous one results in a zero delay.
    pub fn advance(&mut self, time: f64) -> Delay {
        let reference = self.last_sample_time.min(time);
        let delay = time - reference;
        self.last_sample_time = time;
        if delay > 0.0 {
            self.least_sample_difference = self.least_sample_difference.min(delay);
        }
        self.runtime_duration += delay;
        Delay::from_seconds(delay)
    }

    pub fn last_sample_time(&self) -> f64 {
        self.last_sample_time
    }

    /// Smallest strictly positive delay seen so far, infinite if there was none.
    pub fn least_sample_difference(&self) -> f64 {
        self.least_sample_difference
    }

    pub fn runtime_duration(&self) -> f64 {
        self.runtime_duration
    }
}

/// A captured waveform: the delay before every sample and the value of each signal in every
/// sample. Index `i` of `delays` and of every signal refers to the same input record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Waveform {
    delays: Vec<Delay>,
    signals: SignalMap,
    min_positive_delay: f64,
    total_duration: f64,
}

impl Waveform {
    pub fn delays(&self) -> &[Delay] {
        &self.delays
    }

    pub fn signals(&self) -> &SignalMap {
        &self.signals
    }

    pub fn signal(&self, name: &str) -> Option<&[String]> {
        self.signals.get(name).map(|v| v.as_slice())
    }

    pub fn signal_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.signals.keys().map(|k| k.as_str())
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Smallest strictly positive delay, `f64::INFINITY` if no delay was positive.
    pub fn min_positive_delay(&self) -> f64 {
        self.min_positive_delay
    }

    /// Sum of all delays in seconds.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }
}

/// Scans all `records` once. Fails on the first record that cannot be read, that does
/// not match the header or whose timestamp is not a finite number.
pub fn extract<I>(header: &Header, records: I) -> Result<Waveform>
where
    I: IntoIterator<Item = Result<StringRecord>>,
{
    let mut state = RunningTimeState::default();
    let mut delays = Vec::new();
    let mut signals: SignalMap = header
        .signal_columns()
        .map(|(_, name)| (name.to_string(), Vec::new()))
        .collect();

    for (index, record) in records.into_iter().enumerate() {
        let record = record?;
        // the header occupies the first line
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        if record.len() != header.len() {
            return Err(CsvWaveError::MalformedRow {
                line,
                expected: header.len() as u64,
                found: record.len() as u64,
            });
        }

        let time = parse_timestamp(&record[header.time_index()], line)?;
        if time < state.last_sample_time() {
            log::debug!(
                "line {line}: timestamp {time} lies before {}, using a zero delay",
                state.last_sample_time()
            );
        }
        delays.push(state.advance(time));

        for (values, (column, _)) in signals.values_mut().zip(header.signal_columns()) {
            values.push(record[column].trim().to_string());
        }
    }

    log::debug!(
        "extracted {} samples of {} signals spanning {} s",
        delays.len(),
        signals.len(),
        state.runtime_duration()
    );

    Ok(Waveform {
        delays,
        signals,
        min_positive_delay: state.least_sample_difference(),
        total_duration: state.runtime_duration(),
    })
}

fn parse_timestamp(value: &str, line: u64) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(time) if time.is_finite() => Ok(time),
        _ => Err(CsvWaveError::InvalidTimestamp {
            line,
            value: value.to_string(),
        }),
    }
}
