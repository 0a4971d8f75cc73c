//! Consolidating advisor output into one suggestion.
//!
//! Each recommendation casts one vote for the first action keyword found in
//! its text (checked in the order FOLD, RAISE, BET, CHECK, CALL; no keyword
//! counts as CALL). The most voted action wins, earliest vote breaking ties.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::advisors::Recommendation;
use crate::sim::situation::Situation;

/// Reasoning longer than this is cut in the summary.
const SUMMARY_LIMIT: usize = 100;

/// Action named by a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum VoteAction {
    Fold,
    Raise,
    Bet,
    Check,
    Call,
}

impl VoteAction {
    /// Keyword search order.
    pub const KEYWORDS: [VoteAction; 5] = [
        VoteAction::Fold,
        VoteAction::Raise,
        VoteAction::Bet,
        VoteAction::Check,
        VoteAction::Call,
    ];

    /// Upper-case keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            VoteAction::Fold => "FOLD",
            VoteAction::Raise => "RAISE",
            VoteAction::Bet => "BET",
            VoteAction::Check => "CHECK",
            VoteAction::Call => "CALL",
        }
    }

    /// "folding", "raising", ...
    pub fn gerund(&self) -> &'static str {
        match self {
            VoteAction::Fold => "folding",
            VoteAction::Raise => "raising",
            VoteAction::Bet => "betting",
            VoteAction::Check => "checking",
            VoteAction::Call => "calling",
        }
    }

    /// The action a piece of advice points at.
    pub fn from_text(text: &str) -> Self {
        let upper = text.to_uppercase();
        Self::KEYWORDS
            .iter()
            .copied()
            .find(|action| upper.contains(action.keyword()))
            .unwrap_or(VoteAction::Call)
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// How strongly the panel agrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoteConfidence {
    /// Three or more votes.
    High,
    /// Two votes.
    Medium,
    /// A single vote.
    Low,
}

impl VoteConfidence {
    fn from_votes(votes: usize) -> Self {
        match votes {
            3.. => VoteConfidence::High,
            2 => VoteConfidence::Medium,
            _ => VoteConfidence::Low,
        }
    }
}

impl fmt::Display for VoteConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VoteConfidence::High => "High",
            VoteConfidence::Medium => "Medium",
            VoteConfidence::Low => "Low",
        };
        write!(f, "{}", label)
    }
}

/// The consolidated answer to a `discuss` question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discussion {
    /// Question asked.
    pub question: String,
    /// Winning action.
    pub consensus: VoteAction,
    /// Agreement level.
    pub confidence: VoteConfidence,
    /// Votes for the winning action.
    pub vote_count: usize,
    /// Tally in first-vote order.
    pub votes: Vec<(VoteAction, usize)>,
    /// `(agent, short reasoning)` per advisor.
    pub summary: Vec<(String, String)>,
    /// Closing sentence.
    pub reasoning: String,
}

/// Consolidate `recommendations` into one suggestion for `situation`.
///
/// With no recommendations a pot-odds rule of thumb answers instead.
pub fn discuss(question: &str, situation: &Situation, recommendations: &[Recommendation]) -> Discussion {
    if recommendations.is_empty() {
        return heuristic(question, situation);
    }

    let mut counts: FxHashMap<VoteAction, usize> = FxHashMap::default();
    let mut order = Vec::new();
    for rec in recommendations {
        let action = VoteAction::from_text(&rec.recommendation);
        let count = counts.entry(action).or_insert(0);
        if *count == 0 {
            order.push(action);
        }
        *count += 1;
    }

    let votes: Vec<(VoteAction, usize)> = order
        .iter()
        .map(|action| (*action, counts.get(action).copied().unwrap_or(0)))
        .collect();
    let (consensus, vote_count) = votes
        .iter()
        .copied()
        .fold(votes[0], |best, v| if v.1 > best.1 { v } else { best });

    let summary = recommendations
        .iter()
        .map(|rec| (rec.agent.clone(), shorten(&rec.reasoning)))
        .collect();

    Discussion {
        question: question.to_string(),
        consensus,
        confidence: VoteConfidence::from_votes(vote_count),
        vote_count,
        votes,
        summary,
        reasoning: format!(
            "{} advisors recommend {} based on combined analysis of position, pot odds, and strategic considerations.",
            vote_count,
            consensus.gerund()
        ),
    }
}

/// Rule of thumb when no advisor is available.
fn heuristic(question: &str, situation: &Situation) -> Discussion {
    let odds = situation.pot_odds().unwrap_or(0.0);
    let late = situation.position.is_late();

    let (consensus, confidence) = if odds < 0.25 {
        (VoteAction::Call, VoteConfidence::High)
    } else if odds > 0.5 {
        (VoteAction::Fold, VoteConfidence::High)
    } else if late {
        (VoteAction::Raise, VoteConfidence::Medium)
    } else {
        (VoteAction::Call, VoteConfidence::Medium)
    };

    let continuation = if odds < 0.33 {
        "profitable"
    } else if odds < 0.5 {
        "marginal"
    } else {
        "unprofitable"
    };
    let summary = vec![
        (
            "RulesAgent".to_string(),
            "All actions legal - focus on optimal EV play".to_string(),
        ),
        (
            "MathAgent".to_string(),
            format!("Pot odds {:.1}% suggest {} continuation", odds * 100.0, continuation),
        ),
        (
            "PositionAgent".to_string(),
            format!(
                "{} position {}",
                situation.position,
                if late { "favors aggression" } else { "requires caution" }
            ),
        ),
    ];

    let reasoning = match consensus {
        VoteAction::Raise => "Strong pot odds and position support aggressive play",
        VoteAction::Fold => "Poor pot odds warrant disciplined fold",
        _ => "Pot odds justify call with drawing potential",
    };

    Discussion {
        question: question.to_string(),
        consensus,
        confidence,
        vote_count: 0,
        votes: Vec::new(),
        summary,
        reasoning: reasoning.to_string(),
    }
}

fn shorten(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > SUMMARY_LIMIT {
        let cut: String = flat.chars().take(SUMMARY_LIMIT).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisors::{Advisor, RulesAdvisor};
    use crate::cards::HoleCards;
    use crate::sim::situation::Position;

    fn rec(text: &str) -> Recommendation {
        Recommendation::new(&RulesAdvisor, text, 0.8, "because")
    }

    fn spot(position: Position, pot: f64, bet: f64) -> Situation {
        let hole: HoleCards = "Ah Kd".parse().unwrap();
        Situation::new(position, hole).with_pot(pot).with_bet_to_call(bet)
    }

    #[test]
    fn test_keyword_order() {
        assert_eq!(VoteAction::from_text("Fold 72 from UTG"), VoteAction::Fold);
        assert_eq!(VoteAction::from_text("CALL or RAISE"), VoteAction::Raise);
        assert_eq!(VoteAction::from_text("CHECK or BET for value"), VoteAction::Bet);
        assert_eq!(VoteAction::from_text("Open raise with AA"), VoteAction::Raise);
        assert_eq!(VoteAction::from_text("Must call, raise, or fold"), VoteAction::Fold);
        assert_eq!(VoteAction::from_text("Apply balanced approach"), VoteAction::Call);
    }

    #[test]
    fn test_majority_wins() {
        let recs = vec![rec("FOLD now"), rec("raise it"), rec("RAISE big"), rec("raise")];
        let d = discuss("what now?", &spot(Position::BTN, 10.0, 2.0), &recs);
        assert_eq!(d.consensus, VoteAction::Raise);
        assert_eq!(d.vote_count, 3);
        assert_eq!(d.confidence, VoteConfidence::High);
        assert_eq!(d.votes, vec![(VoteAction::Fold, 1), (VoteAction::Raise, 3)]);
        assert!(d.reasoning.starts_with("3 advisors recommend raising"));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let recs = vec![rec("check"), rec("call"), rec("call"), rec("check")];
        let d = discuss("?", &spot(Position::MP, 10.0, 0.0), &recs);
        assert_eq!(d.consensus, VoteAction::Check);
        assert_eq!(d.confidence, VoteConfidence::Medium);

        let d = discuss("?", &spot(Position::MP, 10.0, 0.0), &[rec("bet")]);
        assert_eq!(d.confidence, VoteConfidence::Low);
    }

    #[test]
    fn test_heuristic_without_advisors() {
        let cheap = discuss("?", &spot(Position::UTG, 30.0, 5.0), &[]);
        assert_eq!((cheap.consensus, cheap.confidence), (VoteAction::Call, VoteConfidence::High));

        let dear = discuss("?", &spot(Position::UTG, 5.0, 10.0), &[]);
        assert_eq!((dear.consensus, dear.confidence), (VoteAction::Fold, VoteConfidence::High));

        let middle_late = discuss("?", &spot(Position::CO, 10.0, 5.0), &[]);
        assert_eq!(middle_late.consensus, VoteAction::Raise);
        assert_eq!(middle_late.confidence, VoteConfidence::Medium);

        let middle_early = discuss("?", &spot(Position::SB, 10.0, 5.0), &[]);
        assert_eq!(middle_early.consensus, VoteAction::Call);

        let free = discuss("?", &spot(Position::BB, 10.0, 0.0), &[]);
        assert_eq!(free.consensus, VoteAction::Call);
    }

    #[test]
    fn test_summary_is_shortened() {
        let long = Recommendation::new(&RulesAdvisor, "call", 0.5, "x".repeat(150));
        let d = discuss("?", &spot(Position::BTN, 10.0, 2.0), &[long]);
        assert_eq!(d.summary[0].0, RulesAdvisor.name());
        assert_eq!(d.summary[0].1.len(), SUMMARY_LIMIT + 3);
    }
}
