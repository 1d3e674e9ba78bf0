// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    FemtoSeconds,
    PicoSeconds,
    NanoSeconds,
    MicroSeconds,
    MilliSeconds,
    #[default]
    Seconds,
}

impl TimeUnit {
    pub fn to_exponent(&self) -> i32 {
        match &self {
            TimeUnit::FemtoSeconds => -15,
            TimeUnit::PicoSeconds => -12,
            TimeUnit::NanoSeconds => -9,
            TimeUnit::MicroSeconds => -6,
            TimeUnit::MilliSeconds => -3,
            TimeUnit::Seconds => 0,
        }
    }

    /// Name of the unit as used in VHDL physical literals of type `time`.
    pub fn name(&self) -> &'static str {
        match &self {
            TimeUnit::FemtoSeconds => "fs",
            TimeUnit::PicoSeconds => "ps",
            TimeUnit::NanoSeconds => "ns",
            TimeUnit::MicroSeconds => "us",
            TimeUnit::MilliSeconds => "ms",
            TimeUnit::Seconds => "sec",
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time unit `{0}`, valid are: fs, ps, ns, us, ms, sec")]
pub struct UnknownTimeUnit(pub String);

impl FromStr for TimeUnit {
    type Err = UnknownTimeUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fs" => Ok(TimeUnit::FemtoSeconds),
            "ps" => Ok(TimeUnit::PicoSeconds),
            "ns" => Ok(TimeUnit::NanoSeconds),
            "us" => Ok(TimeUnit::MicroSeconds),
            "ms" => Ok(TimeUnit::MilliSeconds),
            "s" | "sec" => Ok(TimeUnit::Seconds),
            other => Err(UnknownTimeUnit(other.to_string())),
        }
    }
}

/// Time between two consecutive samples. Always stored in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize, serde::Deserialize))]
pub struct Delay(f64);

impl Delay {
    pub const ZERO: Delay = Delay(0.0);

    pub fn from_seconds(seconds: f64) -> Self {
        Delay(seconds)
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Value of the delay when expressed in `unit`.
    pub fn value_in(&self, unit: TimeUnit) -> f64 {
        match unit {
            TimeUnit::Seconds => self.0,
            // 10^-exponent is an exact integer for all units, division by 10^exponent is not
            other => self.0 * 10f64.powi(-other.to_exponent()),
        }
    }
}

impl Display for Delay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, TimeUnit::Seconds)
    }
}
