//! Run-parameter loading and validation.
//!
//! A parameter file is a CSV table with a header row followed by
//! `key,value` rows. Unknown keys are ignored with a debug log so parameter
//! files can carry extra annotations; recognized keys are validated
//! strictly and any violation fails the whole load. A missing parameter
//! file is fatal for the run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use beeworld_types::{Position, Strategy};

/// Errors raised while loading a parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// The parameter file could not be read from disk.
    #[error("failed to read parameter file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A data row could not be parsed.
    #[error("malformed parameter row at line {line}: {reason}")]
    MalformedRow {
        /// 1-based line number within the parameter file.
        line: usize,
        /// Explanation of what was wrong with the row.
        reason: String,
    },

    /// `comm_prob` fell outside `[0, 1]`.
    #[error("comm_prob {value} is outside [0, 1]")]
    InvalidProbability {
        /// The rejected probability.
        value: f64,
    },

    /// `strategy_type` named an unrecognized strategy.
    #[error("unknown strategy_type {name:?}, must be none, random, or intelligent")]
    UnknownStrategy {
        /// The rejected strategy name.
        name: String,
    },

    /// A numeric parameter was negative.
    #[error("parameter {key} must be non-negative, got {value}")]
    NegativeValue {
        /// The offending parameter key.
        key: String,
        /// The rejected value.
        value: i64,
    },
}

/// Validated parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of bees in the roster.
    pub num_bees: u32,
    /// Number of ticks to run.
    pub sim_length: u32,
    /// Initial nectar stock of every flower.
    pub nectar_amount: u32,
    /// Probability that a random-strategy bee recalls a known source.
    pub comm_prob: f64,
    /// Foraging strategy for the run.
    pub strategy: Strategy,
    /// RNG seed; runs with equal parameters and seed are identical.
    pub seed: u64,
    /// Hive grid width in cells.
    pub hive_width: i32,
    /// Hive grid height in cells.
    pub hive_height: i32,
    /// The hive's position in the world frame.
    pub hive_pos: Position,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            num_bees: 5,
            sim_length: 10,
            nectar_amount: 100,
            comm_prob: 0.7,
            strategy: Strategy::Random,
            seed: 42,
            hive_width: 30,
            hive_height: 25,
            hive_pos: Position::new(20, 20),
        }
    }
}

impl Parameters {
    /// Parse parameter CSV content, starting from the defaults.
    ///
    /// The first line is treated as a header and skipped. Blank lines are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::MalformedRow`] for short or unparseable rows,
    /// [`ParamsError::InvalidProbability`] when `comm_prob` is outside
    /// `[0, 1]`, [`ParamsError::UnknownStrategy`] for an unrecognized
    /// `strategy_type`, and [`ParamsError::NegativeValue`] for negative
    /// numeric values.
    pub fn parse(contents: &str) -> Result<Self, ParamsError> {
        let mut params = Self::default();

        for (index, raw_line) in contents.lines().enumerate().skip(1) {
            let line = index.saturating_add(1);
            let row = raw_line.trim();
            if row.is_empty() {
                continue;
            }

            let mut fields = row.split(',').map(str::trim);
            let key = fields.next().unwrap_or_default();
            let value = fields.next().ok_or_else(|| ParamsError::MalformedRow {
                line,
                reason: format!("missing value for key {key:?}"),
            })?;

            match key {
                "comm_prob" => {
                    let prob: f64 = value.parse().map_err(|_parse| ParamsError::MalformedRow {
                        line,
                        reason: format!("comm_prob {value:?} is not a number"),
                    })?;
                    if !(0.0..=1.0).contains(&prob) {
                        return Err(ParamsError::InvalidProbability { value: prob });
                    }
                    params.comm_prob = prob;
                }
                "strategy_type" => {
                    params.strategy =
                        Strategy::parse(value).ok_or_else(|| ParamsError::UnknownStrategy {
                            name: String::from(value),
                        })?;
                }
                "num_bees" => params.num_bees = parse_count(key, value, line)?,
                "sim_length" => params.sim_length = parse_count(key, value, line)?,
                "nectar_amount" => params.nectar_amount = parse_count(key, value, line)?,
                "seed" => {
                    params.seed =
                        u64::from(parse_count(key, value, line)?);
                }
                _ => {
                    debug!(key, value, "ignoring unrecognized parameter");
                }
            }
        }

        Ok(params)
    }

    /// Read and parse a parameter file.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Io`] if the file cannot be read, or any error
    /// from [`Self::parse`].
    pub fn from_file(path: &Path) -> Result<Self, ParamsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

/// Parse a non-negative integer parameter value.
fn parse_count(key: &str, value: &str, line: usize) -> Result<u32, ParamsError> {
    let parsed: i64 = value.parse().map_err(|_parse| ParamsError::MalformedRow {
        line,
        reason: format!("{key} value {value:?} is not an integer"),
    })?;
    if parsed < 0 {
        return Err(ParamsError::NegativeValue {
            key: String::from(key),
            value: parsed,
        });
    }
    u32::try_from(parsed).map_err(|_conv| ParamsError::MalformedRow {
        line,
        reason: format!("{key} value {value:?} is too large"),
    })
}
