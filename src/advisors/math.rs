//! Math advisor: pot odds, rough equity and expected value.
//!
//! Equity here is a lookup, not a simulation. Preflop classes come from a
//! small table (anything missing is 45%) and shrink by 0.8 per extra
//! opponent; post-flop a pocket pair is 65% and everything else 35%.

use crate::advisors::{Advisor, AdvisorError, Recommendation};
use crate::sim::action::money;
use crate::sim::situation::Situation;

/// Preflop equity by rank-only hand class, heads up.
const PREFLOP_EQUITY: &[(&str, f64)] = &[
    ("AA", 85.0),
    ("KK", 82.0),
    ("QQ", 80.0),
    ("JJ", 78.0),
    ("TT", 75.0),
    ("AK", 65.0),
    ("AQ", 60.0),
    ("AJ", 58.0),
    ("AT", 55.0),
    ("KQ", 58.0),
    ("KJ", 55.0),
    ("KT", 52.0),
    ("QJ", 55.0),
    ("QT", 52.0),
    ("JT", 55.0),
    ("99", 72.0),
    ("88", 69.0),
    ("77", 66.0),
    ("66", 63.0),
    ("55", 60.0),
    ("44", 57.0),
    ("33", 54.0),
    ("22", 51.0),
];

const DEFAULT_PREFLOP_EQUITY: f64 = 45.0;
const MULTIWAY_DECAY: f64 = 0.8;
const POSTFLOP_PAIR_EQUITY: f64 = 65.0;
const POSTFLOP_OTHER_EQUITY: f64 = 35.0;

/// Share of raises assumed to take the pot immediately.
pub const FOLD_EQUITY: f64 = 0.3;

/// Price of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct PotOdds {
    /// Call share of the final pot, in percent (one decimal).
    pub percentage: f64,
    /// Traditional `x.x:1` odds.
    pub ratio: String,
    /// Pot after calling.
    pub pot_after_call: f64,
}

impl PotOdds {
    /// Equity needed to break even, in percent.
    pub fn required_equity(&self) -> f64 {
        self.percentage
    }
}

/// Pot odds for calling `bet_to_call` into `pot_size`; `None` with nothing to call.
pub fn pot_odds(pot_size: f64, bet_to_call: f64) -> Option<PotOdds> {
    if bet_to_call <= 0.0 {
        return None;
    }
    let pot_after_call = pot_size + bet_to_call;
    let share = bet_to_call / pot_after_call;
    Some(PotOdds {
        percentage: round_to(share * 100.0, 1),
        ratio: format!("{:.1}:1", 1.0 / share - 1.0),
        pot_after_call,
    })
}

/// Rough equity in percent (one decimal).
pub fn estimate_equity(situation: &Situation) -> f64 {
    let equity = if situation.board.is_empty() {
        let class = situation.hole_cards.class_label();
        let base = PREFLOP_EQUITY
            .iter()
            .find(|(hand, _)| *hand == class)
            .map(|(_, eq)| *eq)
            .unwrap_or(DEFAULT_PREFLOP_EQUITY);
        let extra = situation.opponents.saturating_sub(1) as i32;
        base * MULTIWAY_DECAY.powi(extra)
    } else if situation.hole_cards.is_pair() {
        POSTFLOP_PAIR_EQUITY
    } else {
        POSTFLOP_OTHER_EQUITY
    };
    round_to(equity, 1)
}

/// EV of fold, call and raise (two decimals), in that order.
///
/// Raising wins the pot outright [`FOLD_EQUITY`] of the time and otherwise
/// plays like a call.
pub fn expected_values(pot_size: f64, bet_to_call: f64, equity: f64) -> [(&'static str, f64); 3] {
    let ev_call = equity / 100.0 * (pot_size + bet_to_call) - bet_to_call;
    let ev_raise = FOLD_EQUITY * pot_size + (1.0 - FOLD_EQUITY) * ev_call;
    [
        ("fold", 0.0),
        ("call", round_to(ev_call, 2)),
        ("raise", round_to(ev_raise, 2)),
    ]
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Does the arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathAdvisor;

impl Advisor for MathAdvisor {
    fn name(&self) -> &'static str {
        "MathAgent"
    }

    fn specialty(&self) -> &'static str {
        "Mathematics and Probability"
    }

    fn recommend(&self, situation: &Situation) -> Result<Recommendation, AdvisorError> {
        situation.validate()?;
        let equity = estimate_equity(situation);

        let Some(odds) = pot_odds(situation.pot_size, situation.bet_to_call) else {
            return Ok(Recommendation::new(
                self,
                "CHECK or BET for value",
                0.6,
                format!("Nothing to call\nEstimated equity: {:.1}%", equity),
            ));
        };

        let required = odds.required_equity();
        let mut reasoning = vec![
            format!("Pot odds: {} odds ({:.1}% equity needed)", odds.ratio, required),
            format!("Estimated equity: {:.1}%", equity),
        ];

        let mut recommendation = if equity > required {
            reasoning.push("Profitable call based on pot odds".to_string());
            format!("CALL - Equity ({:.1}%) > Required ({:.1}%)", equity, required)
        } else {
            reasoning.push("Unprofitable call based on pot odds".to_string());
            format!("FOLD - Equity ({:.1}%) < Required ({:.1}%)", equity, required)
        };
        let mut confidence = 0.8;

        let evs = expected_values(situation.pot_size, situation.bet_to_call, equity);
        let (best, best_ev) = evs
            .iter()
            .copied()
            .fold(evs[0], |best, ev| if ev.1 > best.1 { ev } else { best });
        reasoning.push(format!(
            "Expected values: fold {}, call {}, raise {}",
            money(evs[0].1),
            money(evs[1].1),
            money(evs[2].1)
        ));
        reasoning.push(format!("Best EV action: {} ({})", best, money(best_ev)));

        if best_ev > 0.0 {
            recommendation = format!("{} - Best EV (+{})", best.to_uppercase(), money(best_ev));
            confidence = 0.7;
        }

        Ok(Recommendation::new(self, recommendation, confidence, reasoning.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HoleCards;
    use crate::sim::situation::Position;

    fn spot(hole: &str, pot: f64, bet: f64, opponents: u32) -> Situation {
        let hole: HoleCards = hole.parse().unwrap();
        Situation::new(Position::MP, hole)
            .with_pot(pot)
            .with_bet_to_call(bet)
            .with_opponents(opponents)
    }

    #[test]
    fn test_pot_odds() {
        let odds = pot_odds(10.0, 5.0).unwrap();
        assert_eq!(odds.percentage, 33.3);
        assert_eq!(odds.ratio, "2.0:1");
        assert_eq!(odds.pot_after_call, 15.0);
        assert!(pot_odds(10.0, 0.0).is_none());
    }

    #[test]
    fn test_equity_table() {
        assert_eq!(estimate_equity(&spot("Ah As", 0.0, 0.0, 1)), 85.0);
        assert_eq!(estimate_equity(&spot("Ah As", 0.0, 0.0, 2)), 68.0);
        assert_eq!(estimate_equity(&spot("7h 2d", 0.0, 0.0, 1)), 45.0);
        assert_eq!(estimate_equity(&spot("Th Td", 0.0, 0.0, 0)), 75.0);

        let flop = spot("9h 9d", 10.0, 0.0, 1)
            .with_board("2c 5d Kh".parse().unwrap())
            .unwrap();
        assert_eq!(estimate_equity(&flop), 65.0);
        let flop = spot("Ah Kd", 10.0, 0.0, 1)
            .with_board("2c 5d 7h".parse().unwrap())
            .unwrap();
        assert_eq!(estimate_equity(&flop), 35.0);
    }

    #[test]
    fn test_expected_values() {
        let evs = expected_values(10.0, 5.0, 50.0);
        assert_eq!(evs[0], ("fold", 0.0));
        assert_eq!(evs[1], ("call", 2.5));
        assert_eq!(evs[2], ("raise", 4.75));
    }

    #[test]
    fn test_recommends_best_ev() {
        let rec = MathAdvisor.recommend(&spot("Ah As", 10.0, 4.0, 1)).unwrap();
        // call EV 0.85 * 14 - 4 = 7.9, raise 3 + 0.7 * 7.9 = 8.53
        assert_eq!(rec.recommendation, "RAISE - Best EV (+8.53)");
        assert_eq!(rec.confidence, 0.7);
        assert!(rec.reasoning.contains("Pot odds: 2.5:1 odds (28.6% equity needed)"));
    }

    #[test]
    fn test_recommends_fold_when_all_ev_negative() {
        // 72 vs 3 opponents: 45 * 0.64 = 28.8%, facing a pot-sized bet
        let rec = MathAdvisor.recommend(&spot("7h 2d", 0.0, 20.0, 3)).unwrap();
        assert!(rec.recommendation.starts_with("FOLD - Equity (28.8%) < Required (100.0%)"));
        assert_eq!(rec.confidence, 0.8);
    }

    #[test]
    fn test_nothing_to_call() {
        let rec = MathAdvisor.recommend(&spot("Ah Kd", 10.0, 0.0, 1)).unwrap();
        assert_eq!(rec.recommendation, "CHECK or BET for value");
    }
}
