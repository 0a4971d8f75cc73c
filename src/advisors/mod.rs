//! Heuristic advisors.
//!
//! Each advisor looks at a [`Situation`] and returns a [`Recommendation`].
//! Advisors are read-only observers: nothing in the hand engine depends on
//! what they say. The [`AdvisorPanel`] collects them and turns any advisor
//! failure into a zero-confidence placeholder so a broken advisor never
//! stops a hand.

pub mod discussion;
pub mod knowledge;
pub mod math;
pub mod position;
pub mod rules;
pub mod strategy;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::action::money;
use crate::sim::situation::{Situation, SituationError};

pub use discussion::{discuss, Discussion, VoteAction, VoteConfidence};
pub use knowledge::{KnowledgeError, KnowledgeQuery, KnowledgeSource, NoKnowledge, NotesLibrary};
pub use math::MathAdvisor;
pub use position::PositionAdvisor;
pub use rules::{ActionCheck, RulesAdvisor};
pub use strategy::StrategyAdvisor;

/// What an advisor thinks the hero should do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Advisor name.
    pub agent: String,
    /// Area the advisor covers.
    pub specialty: String,
    /// One-line advice.
    pub recommendation: String,
    /// 0.0 to 1.0.
    pub confidence: f64,
    /// Supporting detail, possibly multi-line.
    pub reasoning: String,
    /// Problems the advisor noticed with the situation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl Recommendation {
    /// Build a recommendation for `advisor`.
    pub fn new<A: Advisor + ?Sized>(
        advisor: &A,
        recommendation: impl Into<String>,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            agent: advisor.name().to_string(),
            specialty: advisor.specialty().to_string(),
            recommendation: recommendation.into(),
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            issues: Vec::new(),
        }
    }

    /// Placeholder used when an advisor fails.
    pub fn degraded<A: Advisor + ?Sized>(advisor: &A, error: &AdvisorError) -> Self {
        Self::new(
            advisor,
            "Unable to analyze",
            0.0,
            format!("Advisor error: {}", error),
        )
    }

    /// Attach issues found while analysing.
    pub fn with_issues(mut self, issues: Vec<String>) -> Self {
        self.issues = issues;
        self
    }
}

/// Failure inside an advisor.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The situation handed in does not hold together.
    #[error("invalid situation: {0}")]
    Situation(#[from] SituationError),
    /// The knowledge lookup failed and the advisor cannot do without it.
    #[error("knowledge lookup failed: {0}")]
    Knowledge(#[from] KnowledgeError),
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// A source of advice on a situation.
pub trait Advisor: Send + Sync {
    /// Short display name, e.g. `"MathAgent"`.
    fn name(&self) -> &'static str;

    /// Area of expertise.
    fn specialty(&self) -> &'static str;

    /// Analyse the situation.
    fn recommend(&self, situation: &Situation) -> Result<Recommendation, AdvisorError>;
}

/// The advisors consulted for each hand.
pub struct AdvisorPanel {
    advisors: Vec<Box<dyn Advisor>>,
}

impl AdvisorPanel {
    /// Panel with no advisors.
    pub fn empty() -> Self {
        Self { advisors: Vec::new() }
    }

    /// The standard line-up: rules, math, position and strategy.
    pub fn standard(knowledge: Box<dyn KnowledgeSource>) -> Self {
        Self::empty()
            .with(RulesAdvisor)
            .with(MathAdvisor)
            .with(PositionAdvisor)
            .with(StrategyAdvisor::new(knowledge))
    }

    /// Add an advisor.
    pub fn with<A: Advisor + 'static>(mut self, advisor: A) -> Self {
        self.advisors.push(Box::new(advisor));
        self
    }

    /// Number of advisors.
    pub fn len(&self) -> usize {
        self.advisors.len()
    }

    /// No advisors at all.
    pub fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }

    /// Ask every advisor; failures become degraded recommendations.
    pub fn consult(&self, situation: &Situation) -> Vec<Recommendation> {
        self.advisors
            .iter()
            .map(|advisor| match advisor.recommend(situation) {
                Ok(rec) => rec,
                Err(err) => {
                    log::warn!("{} failed: {}", advisor.name(), err);
                    Recommendation::degraded(advisor.as_ref(), &err)
                }
            })
            .collect()
    }
}

impl Default for AdvisorPanel {
    fn default() -> Self {
        Self::standard(Box::new(NoKnowledge))
    }
}

/// Multi-line summary of a situation, used in advisor reasoning.
pub fn situation_summary(situation: &Situation) -> String {
    let mut lines = vec![
        format!("Position: {}", situation.position),
        format!("Hole Cards: {}", situation.hole_cards),
    ];
    if !situation.board.is_empty() {
        lines.push(format!("Board: {}", situation.board));
    }
    lines.push(format!("Pot Size: {}", money(situation.pot_size)));
    lines.push(format!("Stack Size: {}", money(situation.stack_size)));
    lines.push(format!("Opponents: {}", situation.opponents));
    lines.push(format!("Bet to Call: {}", money(situation.bet_to_call)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::situation::ScenarioKind;

    struct Broken;

    impl Advisor for Broken {
        fn name(&self) -> &'static str {
            "BrokenAgent"
        }

        fn specialty(&self) -> &'static str {
            "Nothing"
        }

        fn recommend(&self, _: &Situation) -> Result<Recommendation, AdvisorError> {
            Err(AdvisorError::Other("connection refused".to_string()))
        }
    }

    #[test]
    fn test_standard_panel() {
        let panel = AdvisorPanel::default();
        assert_eq!(panel.len(), 4);
        let situation = Situation::from_scenario(ScenarioKind::PremiumPair, 100.0);
        let recs = panel.consult(&situation);
        let names: Vec<&str> = recs.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(names, vec!["RulesAgent", "MathAgent", "PositionAgent", "StrategyAgent"]);
        for rec in &recs {
            assert!((0.0..=1.0).contains(&rec.confidence));
            assert!(!rec.recommendation.is_empty());
        }
    }

    #[test]
    fn test_failed_advisor_degrades() {
        let panel = AdvisorPanel::empty().with(Broken).with(RulesAdvisor);
        let situation = Situation::from_scenario(ScenarioKind::BluffSpot, 100.0);
        let recs = panel.consult(&situation);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].agent, "BrokenAgent");
        assert_eq!(recs[0].confidence, 0.0);
        assert_eq!(recs[0].recommendation, "Unable to analyze");
        assert!(recs[0].reasoning.contains("connection refused"));
        assert!(recs[1].confidence > 0.0);
    }

    #[test]
    fn test_summary_lists_board_only_when_dealt() {
        let situation = Situation::from_scenario(ScenarioKind::DrawingHand, 100.0);
        let text = situation_summary(&situation);
        assert!(text.contains("Hole Cards: Kh Qh"));
        assert!(!text.contains("Board:"));
    }
}
