//! Rules advisor: legal options and bet-size checks.

use crate::advisors::{situation_summary, Advisor, AdvisorError, Recommendation};
use crate::sim::action::{money, PlayerAction};
use crate::sim::situation::{Position, Situation};

/// Result of checking a proposed action against the betting rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCheck {
    /// No rule is broken.
    pub is_valid: bool,
    /// Human-readable problems.
    pub issues: Vec<String>,
    /// Suggested replacement, when invalid.
    pub corrected: Option<String>,
}

/// Knows the betting rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesAdvisor;

impl RulesAdvisor {
    /// Check a proposed action.
    ///
    /// A raise must be at least twice the bet to call and may not exceed the
    /// stack; an oversized raise is corrected to all-in.
    pub fn validate_action(&self, action: &PlayerAction, situation: &Situation) -> ActionCheck {
        let mut check = ActionCheck {
            is_valid: true,
            issues: Vec::new(),
            corrected: None,
        };

        if let PlayerAction::Raise(amount) = *action {
            let min_raise = situation.bet_to_call * 2.0;
            if amount < min_raise {
                check.is_valid = false;
                check.issues.push(format!(
                    "Minimum raise is {}, you proposed {}",
                    money(min_raise),
                    money(amount)
                ));
                check.corrected = Some(format!("raise {}", money(min_raise)));
            }
            if amount > situation.stack_size {
                check.is_valid = false;
                check
                    .issues
                    .push("Cannot raise more than your stack size".to_string());
                check.corrected = Some("all-in".to_string());
            }
        }

        check
    }
}

impl Advisor for RulesAdvisor {
    fn name(&self) -> &'static str {
        "RulesAgent"
    }

    fn specialty(&self) -> &'static str {
        "Rules and Game Mechanics"
    }

    fn recommend(&self, situation: &Situation) -> Result<Recommendation, AdvisorError> {
        situation.validate()?;

        let mut issues = Vec::new();
        if situation.bet_to_call > situation.stack_size {
            issues.push("Bet to call exceeds stack size - all-in situation".to_string());
        }

        let recommendation = if situation.bet_to_call > 0.0 {
            "Must call, raise, or fold"
        } else if situation.position == Position::BB {
            "Option to check or bet (you're in big blind)"
        } else {
            "Option to check or bet"
        };

        let mut reasoning = format!("From rules perspective:\n{}", situation_summary(situation));
        if !issues.is_empty() {
            reasoning.push_str(&format!("\nRule issues: {}", issues.join("; ")));
        }

        Ok(Recommendation::new(self, recommendation, 0.9, reasoning).with_issues(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HoleCards;

    fn situation(position: Position, bet: f64, stack: f64) -> Situation {
        let hole: HoleCards = "Ah Qd".parse().unwrap();
        Situation::new(position, hole)
            .with_pot(10.0)
            .with_bet_to_call(bet)
            .with_stack(stack)
    }

    #[test]
    fn test_options() {
        let rec = RulesAdvisor.recommend(&situation(Position::CO, 4.0, 100.0)).unwrap();
        assert_eq!(rec.recommendation, "Must call, raise, or fold");
        assert_eq!(rec.confidence, 0.9);
        assert!(rec.issues.is_empty());

        let rec = RulesAdvisor.recommend(&situation(Position::BB, 0.0, 100.0)).unwrap();
        assert_eq!(rec.recommendation, "Option to check or bet (you're in big blind)");

        let rec = RulesAdvisor.recommend(&situation(Position::UTG, 0.0, 100.0)).unwrap();
        assert_eq!(rec.recommendation, "Option to check or bet");
    }

    #[test]
    fn test_bet_above_stack_flagged() {
        let rec = RulesAdvisor.recommend(&situation(Position::SB, 40.0, 25.0)).unwrap();
        assert_eq!(rec.issues.len(), 1);
        assert!(rec.reasoning.contains("Rule issues: Bet to call exceeds stack size"));
    }

    #[test]
    fn test_min_raise() {
        let s = situation(Position::BTN, 4.0, 100.0);
        let check = RulesAdvisor.validate_action(&PlayerAction::Raise(6.0), &s);
        assert!(!check.is_valid);
        assert_eq!(check.issues, vec!["Minimum raise is 8, you proposed 6".to_string()]);
        assert_eq!(check.corrected.as_deref(), Some("raise 8"));

        let ok = RulesAdvisor.validate_action(&PlayerAction::Raise(8.0), &s);
        assert!(ok.is_valid);
        assert!(RulesAdvisor.validate_action(&PlayerAction::Call, &s).is_valid);
    }

    #[test]
    fn test_raise_above_stack_goes_all_in() {
        let s = situation(Position::BTN, 4.0, 20.0);
        let check = RulesAdvisor.validate_action(&PlayerAction::Raise(50.0), &s);
        assert!(!check.is_valid);
        assert_eq!(check.corrected.as_deref(), Some("all-in"));
    }

    #[test]
    fn test_invalid_situation_is_error() {
        let s = situation(Position::BTN, -1.0, 20.0);
        assert!(RulesAdvisor.recommend(&s).is_err());
    }
}
