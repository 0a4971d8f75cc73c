//! Position advisor: seat strength and opening ranges.
//!
//! Ranges are keyed by the rank-only hand class (`AK`, `TT`, `72`); suits
//! are ignored. The big blind has no opening range and always defends.

use crate::advisors::{Advisor, AdvisorError, Recommendation};
use crate::sim::situation::{Position, Situation};

const UTG_RANGE: &[&str] = &["AA", "KK", "QQ", "JJ", "TT", "99", "AK", "AQ", "AJ", "KQ"];

const MP_RANGE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "AK", "AQ", "AJ", "AT", "KQ", "KJ",
];

const CO_RANGE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "AK", "AQ", "AJ", "AT", "A9",
    "KQ", "KJ", "QJ",
];

const BTN_RANGE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "55", "44", "33", "22", "AK", "AQ",
    "AJ", "AT", "A9", "A8", "A7", "A6", "A5", "A4", "A3", "A2", "KQ", "KJ", "KT", "K9", "QJ",
    "QT", "JT",
];

const SB_RANGE: &[&str] = &[
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "77", "66", "AK", "AQ", "AJ", "AT", "A9", "KQ",
    "KJ", "QJ",
];

/// Opening range for a seat; `None` for the big blind.
pub fn opening_range(position: Position) -> Option<&'static [&'static str]> {
    match position {
        Position::UTG => Some(UTG_RANGE),
        Position::MP => Some(MP_RANGE),
        Position::CO => Some(CO_RANGE),
        Position::BTN => Some(BTN_RANGE),
        Position::SB => Some(SB_RANGE),
        Position::BB => None,
    }
}

/// Seat strength, 1 (worst) to 4 (button).
pub fn position_strength(position: Position) -> u8 {
    match position {
        Position::UTG => 1,
        Position::MP | Position::SB => 2,
        Position::CO | Position::BB => 3,
        Position::BTN => 4,
    }
}

/// Whether `class` opens from `position`.
pub fn in_opening_range(class: &str, position: Position) -> bool {
    match opening_range(position) {
        Some(range) => range.contains(&class),
        None => true,
    }
}

/// Knows which hands to play from which seat.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionAdvisor;

impl PositionAdvisor {
    /// Free-form advice lines for the seat and hand.
    pub fn advice(&self, situation: &Situation) -> Vec<String> {
        let position = situation.position;
        let mut lines: Vec<String> = match position_strength(position) {
            0..=2 => vec![
                "Early position - play tight, only strong hands".into(),
                "Need stronger hands to open due to many players behind".into(),
            ],
            3 => vec![
                "Middle position - can open slightly wider range".into(),
                "Still need to be cautious with marginal hands".into(),
            ],
            _ => vec![
                "Late position - can play wider range".into(),
                "Use position to steal blinds and control pot size".into(),
            ],
        };

        let class = situation.hole_cards.class_label();
        if in_opening_range(&class, position) {
            lines.push(format!("{} is in opening range for {}", class, position));
        } else {
            lines.push(format!("{} is NOT in tight opening range for {}", class, position));
        }
        lines
    }
}

impl Advisor for PositionAdvisor {
    fn name(&self) -> &'static str {
        "PositionAgent"
    }

    fn specialty(&self) -> &'static str {
        "Position and Hand Ranges"
    }

    fn recommend(&self, situation: &Situation) -> Result<Recommendation, AdvisorError> {
        let class = situation.hole_cards.class_label();
        let position = situation.position;

        let (recommendation, confidence) = if in_opening_range(&class, position) {
            (format!("Open raise with {} from {}", class, position), 0.8)
        } else {
            (
                format!("Fold {} from {} - outside opening range", class, position),
                0.9,
            )
        };

        let reasoning = format!(
            "Position analysis for {}:\n{}",
            position,
            self.advice(situation).join("\n")
        );
        Ok(Recommendation::new(self, recommendation, confidence, reasoning))
    }
}
