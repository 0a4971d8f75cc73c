//! Text rendering for the terminal.
//!
//! Everything here returns a `String`; only [`emit`] touches an output
//! stream, and a failed write is logged rather than returned so a broken
//! terminal never interrupts a hand.

use std::io;

use colored::{ColoredString, Colorize};

use crate::advisors::{ActionCheck, Discussion, Recommendation};
use crate::cards::Card;
use crate::sim::action::money;
use crate::sim::ledger::{OutcomeRecord, SessionStats};
use crate::sim::outcome::Outcome;
use crate::sim::situation::Situation;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Write `text` and a newline, logging instead of failing.
pub fn emit<W: io::Write>(out: &mut W, text: &str) {
    if let Err(err) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
        log::warn!("failed to write output: {}", err);
    }
}

/// A card with red suits in red.
pub fn card(card: Card) -> ColoredString {
    let text = card.to_string();
    if card.is_red() {
        text.red()
    } else {
        text.normal()
    }
}

/// Space-separated coloured cards.
pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| card(*c).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn outcome(outcome: Outcome) -> ColoredString {
    match outcome {
        Outcome::Win => outcome.label().green().bold(),
        Outcome::Lose => outcome.label().red().bold(),
        Outcome::Fold => outcome.label().yellow(),
    }
}

fn signed(amount: f64) -> ColoredString {
    let text = format!("{:+.2}", amount);
    if amount > 0.0 {
        text.green()
    } else if amount < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

/// The table before the hero acts.
pub fn situation(situation: &Situation, hand_number: usize) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("HAND #{}", hand_number).bold().to_string(),
        RULE.to_string(),
    ];
    if let Some(kind) = situation.scenario {
        lines.push(format!("Scenario: {} ({})", kind.description(), kind));
    }
    lines.push(format!("Street: {}", situation.street().label()));
    lines.push(format!("Position: {}", situation.position));
    lines.push(format!(
        "Hole Cards: {}",
        cards(&situation.hole_cards.cards())
    ));
    if !situation.board.is_empty() {
        lines.push(format!("Board: {}", cards(situation.board.cards())));
    }
    lines.push(format!("Stack: ${}", money(situation.stack_size)));
    lines.push(format!("Pot: ${}", money(situation.pot_size)));
    lines.push(format!("Bet to Call: ${}", money(situation.bet_to_call)));
    lines.push(format!("Opponents: {}", situation.opponents));
    lines.join("\n")
}

/// Numbered advisor recommendations.
pub fn recommendations(recs: &[Recommendation]) -> String {
    let mut lines = vec!["ADVISOR RECOMMENDATIONS:".bold().to_string()];
    for (i, rec) in recs.iter().enumerate() {
        lines.push(format!(
            "{}. {}: {} ({:.1}%)",
            i + 1,
            rec.agent.cyan(),
            rec.recommendation,
            rec.confidence * 100.0
        ));
        for issue in &rec.issues {
            lines.push(format!("   ! {}", issue.yellow()));
        }
    }
    lines.join("\n")
}

/// Rule problems with the action the hero typed.
pub fn rule_warnings(check: &ActionCheck) -> String {
    let mut lines: Vec<String> = check
        .issues
        .iter()
        .map(|issue| format!("! {}", issue).yellow().to_string())
        .collect();
    if let Some(corrected) = &check.corrected {
        lines.push(format!("  suggested: {}", corrected));
    }
    lines.join("\n")
}

/// The progression log and the result of a finished hand.
pub fn hand_result(record: &OutcomeRecord) -> String {
    let mut lines = vec![
        format!("HAND PROGRESSION (hand #{})", record.hand_number)
            .bold()
            .to_string(),
        THIN_RULE.to_string(),
    ];
    lines.extend(record.progression.iter().map(|entry| entry.text.clone()));
    lines.push(THIN_RULE.to_string());
    lines.push(format!("{} {}", outcome(record.outcome), record.message));
    lines.push(format!(
        "Stack change: {}  |  Stack: ${}",
        signed(record.stack_delta),
        money(record.resulting_stack)
    ));
    lines.join("\n")
}

fn hand_line(record: &OutcomeRecord) -> String {
    format!(
        "Hand {}: {} {} -> {} ({})",
        record.hand_number,
        record.hole_cards,
        record.action,
        outcome(record.outcome),
        signed(record.stack_delta)
    )
}

/// Session totals plus the most recent hands.
pub fn stats(stats: &SessionStats, recent: &[OutcomeRecord]) -> String {
    let Some(win_rate) = stats.win_rate else {
        return "No hands played yet!".to_string();
    };
    let mut lines = vec![
        "SESSION STATS:".bold().to_string(),
        format!("Hands Played: {}", stats.hands_played),
        format!("Starting Stack: ${}", money(stats.starting_stack)),
        format!("Current Stack: ${}", money(stats.current_stack)),
        format!("Profit/Loss: {}", signed(stats.profit)),
        format!("Win Rate: {:.1}%", win_rate * 100.0),
        format!(
            "Wins / Losses / Folds: {} / {} / {}",
            stats.wins, stats.losses, stats.folds
        ),
        String::new(),
        "RECENT HANDS:".bold().to_string(),
    ];
    lines.extend(recent.iter().map(hand_line));
    lines.join("\n")
}

/// Every hand in the session.
pub fn history(records: &[OutcomeRecord]) -> String {
    if records.is_empty() {
        return "No hands played yet!".to_string();
    }
    records.iter().map(hand_line).collect::<Vec<_>>().join("\n")
}

/// A consolidated discussion.
pub fn discussion(discussion: &Discussion) -> String {
    let mut lines = vec![
        format!("ADVISOR DISCUSSION: {}", discussion.question),
        THIN_RULE.to_string(),
        format!(
            "CONSOLIDATED RECOMMENDATION: {} ({} Confidence)",
            discussion.consensus.to_string().bold(),
            discussion.confidence
        ),
        String::new(),
        "ADVISOR SUMMARY:".to_string(),
    ];
    for (agent, reasoning) in &discussion.summary {
        lines.push(format!("- {}: {}", agent, reasoning));
    }
    lines.push(String::new());
    lines.push(format!("REASONING: {}", discussion.reasoning));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisors::discuss;
    use crate::random::ScriptedSource;
    use crate::sim::action::PlayerAction;
    use crate::sim::ledger::SessionLedger;
    use crate::sim::progression::StreetProgression;
    use crate::sim::situation::ScenarioKind;

    fn plain() {
        colored::control::set_override(false);
    }

    fn played_ledger() -> SessionLedger {
        let mut ledger = SessionLedger::new(100.0);
        let situation = Situation::from_scenario(ScenarioKind::PremiumPair, 100.0);
        let mut src = ScriptedSource::constant(0.0);
        let hand = StreetProgression::new().advance(&situation, PlayerAction::Raise(6.0), &mut src);
        ledger.record(hand);
        ledger
    }

    #[test]
    fn test_situation_view() {
        plain();
        let s = Situation::from_scenario(ScenarioKind::ToughDecision, 100.0);
        let text = situation(&s, 3);
        assert!(text.contains("HAND #3"));
        assert!(text.contains("Position: BB"));
        assert!(text.contains("Hole Cards: Ah Qd"));
        assert!(text.contains("Pot: $1.5"));
        assert!(!text.contains("Board:"));
    }

    #[test]
    fn test_hand_result_view() {
        plain();
        let ledger = played_ledger();
        let text = hand_result(&ledger.records()[0]);
        assert!(text.contains("PREFLOP: You raise 6"));
        assert!(text.contains("SHOWDOWN: Ah As vs Opponent on"));
        assert!(text.contains("WIN WINNER!"));
        assert!(text.contains("Stack: $116.5"));
    }

    #[test]
    fn test_stats_view() {
        plain();
        let empty = SessionLedger::new(100.0);
        assert_eq!(stats(&empty.stats(), empty.recent(5)), "No hands played yet!");

        let ledger = played_ledger();
        let text = stats(&ledger.stats(), ledger.recent(5));
        assert!(text.contains("Hands Played: 1"));
        assert!(text.contains("Profit/Loss: +16.50"));
        assert!(text.contains("Win Rate: 100.0%"));
        assert!(text.contains("Hand 1: Ah As raise 6 -> WIN (+16.50)"));
    }

    #[test]
    fn test_discussion_view() {
        plain();
        let s = Situation::from_scenario(ScenarioKind::BluffSpot, 100.0);
        let d = discuss("should I bluff?", &s, &[]);
        let text = discussion(&d);
        assert!(text.contains("ADVISOR DISCUSSION: should I bluff?"));
        assert!(text.contains("CONSOLIDATED RECOMMENDATION: RAISE (Medium Confidence)"));
    }

    #[test]
    fn test_emit_survives_broken_writer() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        emit(&mut Broken, "hello");

        let mut buf = Vec::new();
        emit(&mut buf, "hello");
        assert_eq!(buf, b"hello\n");
    }
}
