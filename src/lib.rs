//! # Poker Coach
//!
//! A single-hand poker training simulator with heuristic strategy advice.
//!
//! ## Features
//!
//! - **Hand engine**: deals the missing streets, grows the pot and settles
//!   the hand with a strength-weighted coin flip
//! - **Heuristic strength**: a tier table over the hole cards, discounted for
//!   flush- and straight-friendly boards
//! - **Advisors**: rules, math, position and strategy heuristics, merged into
//!   one suggestion by keyword vote
//! - **Reproducible**: every random draw goes through an injectable source
//!
//! ## Quick Start
//!
//! ```
//! use poker_coach::sim::{PlayerAction, ScenarioKind, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default().with_seed(42)).unwrap();
//! session.deal_scenario(ScenarioKind::PremiumPair);
//! let record = session.play(PlayerAction::Raise(6.0)).unwrap();
//! assert_eq!(record.final_board.len(), 5);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: cards, hole cards, board, deck
//! - [`random`]: the random source abstraction
//! - [`sim`]: strength estimate, progression, outcome, ledger, session
//! - [`advisors`]: heuristic advisors and the discussion vote
//! - [`display`]: terminal rendering
//! - [`cli`]: the interactive command loop
//!
//! ## Architecture
//!
//! ```text
//!   Situation ──► StreetProgression ──► OutcomeResolver ──► SessionLedger
//!       │              │  deals streets        coin flip        stats
//!       │              └─► HandStrengthEstimator
//!       └──► AdvisorPanel ──► discuss()      (read-only observers)
//! ```

#![warn(missing_docs)]

/// Card model: ranks, suits, hole cards, board and deck.
pub mod cards;

/// Injectable randomness.
pub mod random;

/// The hand simulation engine.
pub mod sim;

/// Heuristic advisors.
pub mod advisors;

/// Terminal rendering.
pub mod display;

/// Interactive command loop.
pub mod cli;

pub use cards::{Board, Card, Deck, HoleCards, Street};
pub use random::{RandomSource, ScriptedSource};
pub use sim::{
    HandStrengthEstimator, OutcomeResolver, PlayerAction, Session, SessionConfig, SessionLedger,
    Situation, StreetProgression,
};
