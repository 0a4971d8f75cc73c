//! Session configuration.
//!
//! Controls the bankroll, the random seed and the ranges used when dealing
//! random hands. Can be loaded from a JSON file; every field is optional
//! and falls back to the default below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a simulator session.
///
/// # Example
/// ```
/// use poker_coach::sim::SessionConfig;
///
/// let config = SessionConfig::default().with_seed(42);
/// assert_eq!(config.starting_stack, 100.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bankroll at the start of the session and after `reset`.
    pub starting_stack: f64,

    /// Random seed for reproducibility.
    ///
    /// If set, every draw in the session is reproducible. If `None`, the
    /// session seeds from entropy.
    pub seed: Option<u64>,

    /// Pot size range for random hands (inclusive low, exclusive high).
    pub pot_range: (f64, f64),

    /// Bet-to-call range for random hands.
    pub bet_to_call_range: (f64, f64),

    /// Opponent count range for random hands (inclusive).
    pub opponent_range: (u32, u32),

    /// Chance that a random hand starts with a flop, turn or river board.
    pub board_probability: f64,

    /// How many recent hands the stats view lists.
    pub recent_hands: usize,

    /// Optional JSON file of strategy notes for the knowledge lookup.
    pub knowledge_notes: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_stack: 100.0,
            seed: None,
            pot_range: (5.0, 25.0),
            bet_to_call_range: (0.0, 15.0),
            opponent_range: (1, 4),
            board_probability: 0.4,
            recent_hands: 5,
            knowledge_notes: None,
        }
    }
}

impl SessionConfig {
    /// Create a new SessionConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the starting stack.
    pub fn with_starting_stack(mut self, stack: f64) -> Self {
        self.starting_stack = stack;
        self
    }

    /// Builder method: set the chance of a post-flop start.
    pub fn with_board_probability(mut self, p: f64) -> Self {
        self.board_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Builder method: set the strategy notes file.
    pub fn with_knowledge_notes(mut self, path: impl Into<PathBuf>) -> Self {
        self.knowledge_notes = Some(path.into());
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.starting_stack.is_finite() && self.starting_stack > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "starting_stack",
                message: format!("must be positive, got {}", self.starting_stack),
            });
        }

        check_range("pot_range", self.pot_range)?;
        check_range("bet_to_call_range", self.bet_to_call_range)?;

        if self.opponent_range.0 > self.opponent_range.1 {
            return Err(ConfigError::InvalidValue {
                field: "opponent_range",
                message: format!(
                    "low {} exceeds high {}",
                    self.opponent_range.0, self.opponent_range.1
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.board_probability) {
            return Err(ConfigError::InvalidValue {
                field: "board_probability",
                message: format!("{} is out of range [0, 1]", self.board_probability),
            });
        }

        Ok(())
    }
}

fn check_range(field: &'static str, (low, high): (f64, f64)) -> Result<(), ConfigError> {
    if !(low.is_finite() && high.is_finite()) || low < 0.0 || low > high {
        return Err(ConfigError::InvalidValue {
            field,
            message: format!("expected 0 <= low <= high, got ({}, {})", low, high),
        });
    }
    Ok(())
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The JSON did not match the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds an unusable value.
    #[error("invalid {field}: {message}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
