//! Session bankroll and hand history.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Board, HoleCards};
use crate::sim::action::PlayerAction;
use crate::sim::outcome::{HandOutcome, Outcome};
use crate::sim::progression::ProgressionEntry;
use crate::sim::situation::{Position, ScenarioKind};

/// A booked hand. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// 1-based hand number within the session.
    pub hand_number: u32,
    /// Scenario the hand came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioKind>,
    /// Hero seat.
    pub position: Position,
    /// Hero hole cards.
    pub hole_cards: HoleCards,
    /// Action taken.
    pub action: PlayerAction,
    /// Win, lose or fold.
    pub outcome: Outcome,
    /// Signed change to the stack.
    pub stack_delta: f64,
    /// Stack after this hand.
    pub resulting_stack: f64,
    /// Pot at the end of the hand.
    pub final_pot: f64,
    /// Board at the end of the hand.
    pub final_board: Board,
    /// Resolver summary line.
    pub message: String,
    /// Street log.
    pub progression: Vec<ProgressionEntry>,
}

/// Aggregate numbers for the stats view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    /// Hands booked.
    pub hands_played: usize,
    /// Showdowns won.
    pub wins: usize,
    /// Showdowns lost.
    pub losses: usize,
    /// Folds.
    pub folds: usize,
    /// Bankroll at session start.
    pub starting_stack: f64,
    /// Bankroll now.
    pub current_stack: f64,
    /// `current_stack - starting_stack`.
    pub profit: f64,
    /// Wins over hands played; `None` before the first hand.
    pub win_rate: Option<f64>,
}

/// Failure writing the hand history.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The export file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Serialisation failed.
    #[error("failed to serialise hand history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Running bankroll plus every hand played since the last reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLedger {
    starting_stack: f64,
    current_stack: f64,
    records: Vec<OutcomeRecord>,
}

impl SessionLedger {
    /// Empty ledger holding `starting_stack`.
    pub fn new(starting_stack: f64) -> Self {
        Self {
            starting_stack,
            current_stack: starting_stack,
            records: Vec::new(),
        }
    }

    /// Book a played hand and return the stored record.
    pub fn record(&mut self, hand: HandOutcome) -> &OutcomeRecord {
        self.current_stack += hand.stack_delta();
        let record = OutcomeRecord {
            hand_number: self.records.len() as u32 + 1,
            scenario: hand.scenario,
            position: hand.position,
            hole_cards: hand.hole_cards,
            action: hand.action,
            outcome: hand.outcome(),
            stack_delta: hand.stack_delta(),
            resulting_stack: self.current_stack,
            final_pot: hand.final_pot,
            final_board: hand.final_board,
            message: hand.resolution.message,
            progression: hand.progression,
        };
        log::info!(
            "hand #{}: {} -> {} ({:+.2}), stack {:.2}",
            record.hand_number,
            record.action,
            record.outcome.label(),
            record.stack_delta,
            record.resulting_stack
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Clear the history and restore the starting stack.
    pub fn reset(&mut self) {
        *self = Self::new(self.starting_stack);
    }

    /// Summary numbers.
    pub fn stats(&self) -> SessionStats {
        let count = |o: Outcome| self.records.iter().filter(|r| r.outcome == o).count();
        let wins = count(Outcome::Win);
        let hands_played = self.records.len();
        SessionStats {
            hands_played,
            wins,
            losses: count(Outcome::Lose),
            folds: count(Outcome::Fold),
            starting_stack: self.starting_stack,
            current_stack: self.current_stack,
            profit: self.current_stack - self.starting_stack,
            win_rate: (hands_played > 0).then(|| wins as f64 / hands_played as f64),
        }
    }

    /// Bankroll at session start.
    pub fn starting_stack(&self) -> f64 {
        self.starting_stack
    }

    /// Bankroll now.
    pub fn current_stack(&self) -> f64 {
        self.current_stack
    }

    /// Every hand, oldest first.
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// The last `n` hands, oldest first.
    pub fn recent(&self, n: usize) -> &[OutcomeRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Most recent hand.
    pub fn last(&self) -> Option<&OutcomeRecord> {
        self.records.last()
    }

    /// Pretty JSON of the whole ledger.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the ledger as pretty JSON.
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), LedgerError> {
        let path = path.as_ref();
        let io_err = |source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }
}
