//! Showdown resolution.
//!
//! The hero's chance of winning is the heuristic hand strength, nudged up
//! for late position and for raising. A single unit draw decides the hand.

use serde::{Deserialize, Serialize};

use crate::cards::{Board, HoleCards};
use crate::random::RandomSource;
use crate::sim::action::{money, PlayerAction};
use crate::sim::progression::{Phase, ProgressionEntry};
use crate::sim::situation::{Position, ScenarioKind};

/// Hands shown by the opponent when the hero loses. Narration only.
pub const OPPONENT_HANDS: [&str; 10] = [
    "Kh Qd", "Jc Ts", "9h 8s", "Ah 5d", "Qd Jh", "Tc 9c", "8d 7h", "As Kd", "Qh Qc", "Jd Jh",
];

/// How a hand ended for the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Fold,
}

impl Outcome {
    /// Upper-case label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Lose => "LOSE",
            Outcome::Fold => "FOLD",
        }
    }
}

/// The result of resolving one hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Win, lose or fold.
    pub outcome: Outcome,
    /// Signed change to the hero's stack.
    pub stack_delta: f64,
    /// Adjusted win chance; `None` for a fold.
    pub win_probability: Option<f64>,
    /// Hand shown by the opponent when the hero loses.
    pub opponent_hand: Option<String>,
    /// One-line summary.
    pub message: String,
}

/// Strength-weighted coin flip at showdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeResolver {
    /// Added to the win chance from CO or BTN.
    pub late_position_bonus: f64,
    /// Added to the win chance when the hero raised.
    pub raise_bonus: f64,
}

impl Default for OutcomeResolver {
    fn default() -> Self {
        Self {
            late_position_bonus: 0.10,
            raise_bonus: 0.05,
        }
    }
}

impl OutcomeResolver {
    /// Resolver with the standard bonuses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Win chance for a given strength, seat and action.
    pub fn win_probability(&self, strength: f64, position: Position, action: &PlayerAction) -> f64 {
        let mut p = strength;
        if position.is_late() {
            p += self.late_position_bonus;
        }
        if action.is_raise() {
            p += self.raise_bonus;
        }
        p
    }

    /// Resolve a showdown.
    ///
    /// Wins pay `pot_size - total_invested`; losses cost `total_invested`.
    /// The opponent hand is drawn only on a loss.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        strength: f64,
        position: Position,
        action: &PlayerAction,
        pot_size: f64,
        total_invested: f64,
        rng: &mut R,
    ) -> Resolution {
        let win_probability = self.win_probability(strength, position, action);
        let roll = rng.unit();

        if roll < win_probability {
            Resolution {
                outcome: Outcome::Win,
                stack_delta: pot_size - total_invested,
                win_probability: Some(win_probability),
                opponent_hand: None,
                message: format!("WINNER! You win ${} pot", money(pot_size)),
            }
        } else {
            let shown = OPPONENT_HANDS[rng.index(OPPONENT_HANDS.len())];
            Resolution {
                outcome: Outcome::Lose,
                stack_delta: -total_invested,
                win_probability: Some(win_probability),
                opponent_hand: Some(shown.to_string()),
                message: format!("LOSE: Opponent wins with {}", shown),
            }
        }
    }

    /// Resolution for folding: the bet to call is lost, nothing is drawn.
    pub fn fold(&self, bet_to_call: f64) -> Resolution {
        Resolution {
            outcome: Outcome::Fold,
            stack_delta: -bet_to_call,
            win_probability: None,
            opponent_hand: None,
            message: format!("FOLDED: You lose ${}", money(bet_to_call)),
        }
    }
}

/// Everything one played hand produced, before it is booked in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandOutcome {
    /// Scenario the hand came from.
    pub scenario: Option<ScenarioKind>,
    /// Hero seat.
    pub position: Position,
    /// Hero hole cards.
    pub hole_cards: HoleCards,
    /// Action the hero took.
    pub action: PlayerAction,
    /// Chips the hero put in.
    pub invested: f64,
    /// Pot at the end of the hand.
    pub final_pot: f64,
    /// Board at the end of the hand.
    pub final_board: Board,
    /// Strength estimate on the final board.
    pub final_strength: f64,
    /// Terminal phase reached (`Showdown` or `Folded`).
    pub phase: Phase,
    /// How the hand was resolved.
    pub resolution: Resolution,
    /// Street by street log.
    pub progression: Vec<ProgressionEntry>,
}

impl HandOutcome {
    /// Win, lose or fold.
    pub fn outcome(&self) -> Outcome {
        self.resolution.outcome
    }

    /// Signed change to the hero's stack.
    pub fn stack_delta(&self) -> f64 {
        self.resolution.stack_delta
    }
}
