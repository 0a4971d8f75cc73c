//! Hand simulation engine.
//!
//! - [`strength`]: heuristic hand-strength estimate
//! - [`situation`]: the hand as dealt, plus named and random scenarios
//! - [`progression`]: street-by-street state machine
//! - [`outcome`]: showdown resolution
//! - [`ledger`]: bankroll and hand history
//! - [`session`]: owns one bankroll and its random source

pub mod action;
pub mod config;
pub mod ledger;
pub mod outcome;
pub mod progression;
pub mod session;
pub mod situation;
pub mod strength;

pub use action::{money, PlayerAction};
pub use config::{ConfigError, SessionConfig};
pub use ledger::{LedgerError, OutcomeRecord, SessionLedger, SessionStats};
pub use outcome::{HandOutcome, Outcome, OutcomeResolver, Resolution};
pub use progression::{Phase, ProgressionEntry, StreetProgression};
pub use session::Session;
pub use situation::{random_situation, Position, ScenarioKind, Situation, SituationError};
pub use strength::{HandStrengthEstimator, StrengthTable};
