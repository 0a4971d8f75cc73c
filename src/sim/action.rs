//! Player actions and command parsing.
//!
//! The hero acts once per hand with one of `fold`, `check`, `call`,
//! `bet [amount]` or `raise [amount]`. Amounts are in chips (the same
//! unit as pot and stack).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raise size used when an explicit amount cannot be read.
pub const FALLBACK_RAISE: f64 = 5.0;

/// A hero action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum PlayerAction {
    /// Fold the hand, forfeiting the amount already committed.
    Fold,
    /// Check (commits the bet to call, if any).
    Check,
    /// Call the current bet.
    Call,
    /// Bet a specific amount.
    Bet(f64),
    /// Raise by a specific amount.
    Raise(f64),
}

impl PlayerAction {
    /// Parse a command such as `"raise 6"` against the current bet to call.
    ///
    /// Returns `None` when the command is not an action. An omitted amount
    /// defaults to `max(2 * bet_to_call, 5)`; an unreadable, negative or zero
    /// amount falls back to [`FALLBACK_RAISE`].
    pub fn parse(input: &str, bet_to_call: f64) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let verb = parts.next()?.to_ascii_lowercase();
        let amount = parts.next();

        match verb.as_str() {
            "fold" => Some(PlayerAction::Fold),
            "check" => Some(PlayerAction::Check),
            "call" => Some(PlayerAction::Call),
            "bet" => Some(PlayerAction::Bet(sizing(amount, bet_to_call))),
            "raise" => Some(PlayerAction::Raise(sizing(amount, bet_to_call))),
            _ => None,
        }
    }

    /// Whether this is a fold.
    pub fn is_fold(&self) -> bool {
        matches!(self, PlayerAction::Fold)
    }

    /// Whether this is a raise (bets do not count).
    pub fn is_raise(&self) -> bool {
        matches!(self, PlayerAction::Raise(_))
    }

    /// Check if this is a voluntary money-putting action.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, PlayerAction::Bet(_) | PlayerAction::Raise(_))
    }

    /// Get the bet/raise amount if applicable.
    pub fn amount(&self) -> Option<f64> {
        match self {
            PlayerAction::Bet(amt) | PlayerAction::Raise(amt) => Some(*amt),
            _ => None,
        }
    }

    /// Chips this action puts into the pot facing `bet_to_call`.
    ///
    /// Sized actions commit their amount; everything else commits the
    /// bet to call.
    pub fn committed(&self, bet_to_call: f64) -> f64 {
        match self.amount() {
            Some(amt) if amt > 0.0 => amt,
            _ => bet_to_call,
        }
    }

    /// Lower-case verb ("raise").
    pub fn verb(&self) -> &'static str {
        match self {
            PlayerAction::Fold => "fold",
            PlayerAction::Check => "check",
            PlayerAction::Call => "call",
            PlayerAction::Bet(_) => "bet",
            PlayerAction::Raise(_) => "raise",
        }
    }
}

fn sizing(amount: Option<&str>, bet_to_call: f64) -> f64 {
    match amount {
        None => (bet_to_call * 2.0).max(FALLBACK_RAISE),
        Some(raw) => match raw.trim_start_matches('$').parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => FALLBACK_RAISE,
        },
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amt) => write!(f, "{} {}", self.verb(), money(amt)),
            None => write!(f, "{}", self.verb()),
        }
    }
}

/// Format chips without trailing zeros ("6", "7.5").
pub fn money(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
            .trim_end_matches('0')
            .to_string()
    }
}
