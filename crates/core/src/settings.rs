//! Laser operations and per-path power/speed settings.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Laser operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    /// Full-depth separation of the material.
    Cut,
    /// Surface marking.
    Engrave,
    /// Partial-depth scoring.
    Score,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 3] = [Operation::Cut, Operation::Engrave, Operation::Score];

    /// Execution priority within a job. Lower runs first.
    ///
    /// Engrave and score register against the sheet before any cut can
    /// release a piece from it.
    pub fn priority(self) -> u8 {
        match self {
            Operation::Engrave => 1,
            Operation::Score => 2,
            Operation::Cut => 3,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Cut => "cut",
            Operation::Engrave => "engrave",
            Operation::Score => "score",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cut" => Ok(Operation::Cut),
            "engrave" => Ok(Operation::Engrave),
            "score" => Ok(Operation::Score),
            other => Err(Error::InvalidSettings(format!("unknown operation '{}'", other))),
        }
    }
}

/// Power/speed/pass settings for a single path or layer.
///
/// `power` is a percentage of the source's rated output, `speed` is in
/// mm/min.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaserSettings {
    /// Output power in percent, 0–100.
    pub power: f64,
    /// Head speed in mm/min, strictly positive.
    pub speed: f64,
    /// Number of passes, at least 1.
    pub passes: u32,
    /// Whether air assist is enabled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub air_assist: bool,
}

impl LaserSettings {
    /// Creates settings with air assist off.
    pub fn new(power: f64, speed: f64, passes: u32) -> Self {
        Self {
            power,
            speed,
            passes,
            air_assist: false,
        }
    }

    /// Sets air assist.
    pub fn with_air_assist(mut self, air_assist: bool) -> Self {
        self.air_assist = air_assist;
        self
    }

    /// Checks the physical domain of each field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.power) {
            return Err(Error::InvalidSettings(format!(
                "power {} outside 0-100%",
                self.power
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(Error::InvalidSettings(format!(
                "speed {} must be positive",
                self.speed
            )));
        }
        if self.passes == 0 {
            return Err(Error::InvalidSettings("passes must be at least 1".into()));
        }
        Ok(())
    }

    /// Key used to bucket paths that can run without a parameter change.
    ///
    /// Floats are compared by bit pattern, so only exact matches group.
    pub fn group_key(&self, operation: Operation) -> (Operation, u64, u64) {
        (operation, self.power.to_bits(), self.speed.to_bits())
    }
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            power: 50.0,
            speed: 1000.0,
            passes: 1,
            air_assist: false,
        }
    }
}
