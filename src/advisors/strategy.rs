//! Strategy advisor backed by the strategy-note library.

use crate::advisors::knowledge::{KnowledgeQuery, KnowledgeSource, NoKnowledge};
use crate::advisors::{Advisor, AdvisorError, Recommendation};
use crate::sim::situation::{Position, Situation};

const PREMIUM: &[&str] = &["AA", "KK", "QQ", "AK"];
const EARLY_OPENERS: &[&str] = &["AA", "KK", "QQ", "JJ", "AK"];

/// Insights longer than this are cut in the reasoning text.
const INSIGHT_LIMIT: usize = 400;
/// Context longer than this counts as a real hit and raises confidence.
const USEFUL_CONTEXT: usize = 50;

/// General strategy framework plus looked-up notes.
pub struct StrategyAdvisor {
    knowledge: Box<dyn KnowledgeSource>,
}

impl StrategyAdvisor {
    /// Advisor drawing on `knowledge`.
    pub fn new(knowledge: Box<dyn KnowledgeSource>) -> Self {
        Self { knowledge }
    }

    /// Look up notes for the situation. A failed lookup yields no context.
    pub fn lookup(&self, situation: &Situation) -> String {
        let mut text = vec![
            situation.hole_cards.class_label(),
            situation.hole_cards.to_string(),
        ];
        if !situation.board.is_empty() {
            text.push(format!("board {}", situation.board));
        }
        if situation.bet_to_call > 0.0 {
            text.push("facing bet".to_string());
        }
        text.extend(["strategy", "decision", "analysis"].map(String::from));

        let query = KnowledgeQuery {
            text: text.join(" "),
            position: Some(situation.position.to_string()),
            stack: Some(situation.stack_size),
            pot: Some(situation.pot_size),
        };
        match self.knowledge.context_for(&query) {
            Ok(context) => context,
            Err(err) => {
                log::warn!("strategy lookup failed: {}", err);
                String::new()
            }
        }
    }

    /// Framework notes as `(aspect, analysis)` pairs.
    pub fn framework(&self, situation: &Situation, context: &str) -> Vec<(&'static str, String)> {
        let range = match situation.position {
            Position::BTN | Position::CO => {
                "Late position allows for wider opening ranges and more bluffing opportunities"
            }
            Position::UTG => "Early position requires tight ranges and strong hands",
            Position::SB | Position::BB => {
                "Blind positions require careful defense frequency calculations"
            }
            Position::MP => "Analyzing hand ranges based on position and action",
        };

        let mut sizing = "Optimal bet sizing for value and bluffs";
        if situation.pot_size > 0.0 && situation.bet_to_call > 0.0 {
            let ratio = situation.bet_to_call / situation.pot_size;
            sizing = if ratio < 0.5 {
                "Small bet size suggests value betting or pot control"
            } else if ratio > 1.0 {
                "Large bet size indicates strong hand or big bluff"
            } else {
                "Standard bet sizing, analyze based on range and position"
            };
        }

        let lower = context.to_lowercase();
        let style = if lower.contains("aggressive") || lower.contains("loose") {
            "Opponent appears loose/aggressive - tighten up and value bet more"
        } else if lower.contains("tight") || lower.contains("passive") {
            "Opponent appears tight/passive - can bluff more and value bet thinner"
        } else {
            "Balancing theoretical optimal play with exploitative adjustments"
        };

        vec![
            ("Range Analysis", range.to_string()),
            ("Bet Sizing", sizing.to_string()),
            ("Opponent Tendencies", "Reading opponent patterns and adjustments".to_string()),
            ("GTO vs Exploitative", style.to_string()),
        ]
    }
}

impl Default for StrategyAdvisor {
    fn default() -> Self {
        Self::new(Box::new(NoKnowledge))
    }
}

impl Advisor for StrategyAdvisor {
    fn name(&self) -> &'static str {
        "StrategyAgent"
    }

    fn specialty(&self) -> &'static str {
        "Strategy Library"
    }

    fn recommend(&self, situation: &Situation) -> Result<Recommendation, AdvisorError> {
        let context = self.lookup(situation);
        let mut reasoning = Vec::new();
        let mut confidence = 0.7;

        if context.chars().count() > USEFUL_CONTEXT {
            reasoning.push("=== Relevant Insights ===".to_string());
            if context.chars().count() > INSIGHT_LIMIT {
                let cut: String = context.chars().take(INSIGHT_LIMIT).collect();
                reasoning.push(format!("{}...", cut));
            } else {
                reasoning.push(context.clone());
            }
            confidence = 0.8;
        }

        reasoning.push("=== Framework Analysis ===".to_string());
        for (aspect, analysis) in self.framework(situation, &context) {
            reasoning.push(format!("{}: {}", aspect, analysis));
        }

        let class = situation.hole_cards.class_label();
        let mut recommendation =
            "Apply balanced GTO approach with exploitative adjustments".to_string();
        if PREMIUM.contains(&class.as_str()) {
            recommendation = format!("Premium hand ({}) - bet for value, build pot", class);
            confidence = 0.9;
        } else if situation.position.is_late() {
            recommendation = format!("In position with {} - can play more aggressively", class);
            confidence = 0.8;
        } else if situation.position == Position::UTG && !EARLY_OPENERS.contains(&class.as_str()) {
            recommendation = format!("Early position with {} - consider tighter play", class);
            confidence = 0.8;
        }

        if let Some(odds) = situation.pot_odds() {
            reasoning.push(format!("Facing bet - need {:.1}% equity to call", odds * 100.0));
        }

        Ok(Recommendation::new(self, recommendation, confidence, reasoning.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisors::knowledge::{KnowledgeError, NotesLibrary};
    use crate::cards::HoleCards;

    struct Offline;

    impl KnowledgeSource for Offline {
        fn context_for(&self, _: &KnowledgeQuery) -> Result<String, KnowledgeError> {
            Err(KnowledgeError::Unavailable("offline".into()))
        }
    }

    fn spot(position: Position, hole: &str) -> Situation {
        let hole: HoleCards = hole.parse().unwrap();
        Situation::new(position, hole).with_pot(10.0).with_bet_to_call(4.0)
    }

    #[test]
    fn test_hand_rules() {
        let advisor = StrategyAdvisor::default();

        let rec = advisor.recommend(&spot(Position::UTG, "Ah Kd")).unwrap();
        assert_eq!(rec.recommendation, "Premium hand (AK) - bet for value, build pot");
        assert_eq!(rec.confidence, 0.9);

        let rec = advisor.recommend(&spot(Position::CO, "7h 8h")).unwrap();
        assert_eq!(rec.recommendation, "In position with 87 - can play more aggressively");

        let rec = advisor.recommend(&spot(Position::UTG, "Th 9h")).unwrap();
        assert_eq!(rec.recommendation, "Early position with T9 - consider tighter play");

        let rec = advisor.recommend(&spot(Position::UTG, "Jh Jd")).unwrap();
        assert_eq!(
            rec.recommendation,
            "Apply balanced GTO approach with exploitative adjustments"
        );
        assert_eq!(rec.confidence, 0.7);
        assert!(rec.reasoning.contains("Facing bet - need 28.6% equity to call"));
    }

    #[test]
    fn test_framework_bet_sizing() {
        let advisor = StrategyAdvisor::default();
        let small = spot(Position::MP, "9h 9d").with_bet_to_call(2.0);
        let framework = advisor.framework(&small, "");
        assert_eq!(framework[1].1, "Small bet size suggests value betting or pot control");

        let large = spot(Position::MP, "9h 9d").with_bet_to_call(15.0);
        let framework = advisor.framework(&large, "villain is loose");
        assert_eq!(framework[1].1, "Large bet size indicates strong hand or big bluff");
        assert!(framework[3].1.starts_with("Opponent appears loose/aggressive"));
    }

    #[test]
    fn test_notes_raise_confidence() {
        let notes = NotesLibrary::from_json_str(
            r#"[{"title": "Middle pairs", "tags": ["99"], "text": "Middle pocket pairs play well in position against a single raiser, and fold to heavy action from early seats."}]"#,
        )
        .unwrap();
        let advisor = StrategyAdvisor::new(Box::new(notes));
        let rec = advisor.recommend(&spot(Position::MP, "9h 9d")).unwrap();
        assert_eq!(rec.confidence, 0.8);
        assert!(rec.reasoning.contains("Middle pairs:"));
    }

    #[test]
    fn test_lookup_failure_is_tolerated() {
        let advisor = StrategyAdvisor::new(Box::new(Offline));
        let rec = advisor.recommend(&spot(Position::SB, "5h 4h")).unwrap();
        assert_eq!(rec.confidence, 0.7);
        assert!(rec.reasoning.contains("Blind positions require careful defense"));
    }
}
