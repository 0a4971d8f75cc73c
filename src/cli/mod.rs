//! Interactive command loop.
//!
//! [`Simulator::handle`] takes one line of input and returns the text to
//! show. It never fails: every problem becomes an explanatory reply.

pub mod command;

pub use command::{Command, HELP};

use crate::advisors::{
    discuss, AdvisorPanel, KnowledgeSource, NoKnowledge, NotesLibrary, Recommendation,
    RulesAdvisor,
};
use crate::display;
use crate::sim::action::money;
use crate::sim::config::{ConfigError, SessionConfig};
use crate::sim::session::Session;
use crate::sim::situation::ScenarioKind;

const NO_HAND: &str = "No active hand! Deal a new hand first with 'new'";

/// Text to show after a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Output, possibly empty.
    pub text: String,
    /// The loop should stop.
    pub quit: bool,
}

impl Reply {
    fn show(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

/// A session plus the advisors watching it.
pub struct Simulator {
    session: Session,
    panel: AdvisorPanel,
    recommendations: Vec<Recommendation>,
}

impl Simulator {
    /// Simulator over an existing session and panel.
    pub fn new(session: Session, panel: AdvisorPanel) -> Self {
        Self {
            session,
            panel,
            recommendations: Vec::new(),
        }
    }

    /// Build the session and the standard panel from configuration.
    ///
    /// A notes file that cannot be loaded is logged and skipped.
    pub fn from_config(config: SessionConfig) -> Result<Self, ConfigError> {
        let knowledge: Box<dyn KnowledgeSource> = match &config.knowledge_notes {
            Some(path) => match NotesLibrary::from_json_file(path) {
                Ok(library) => Box::new(library),
                Err(err) => {
                    log::warn!("strategy notes unavailable: {}", err);
                    Box::new(NoKnowledge)
                }
            },
            None => Box::new(NoKnowledge),
        };
        let session = Session::new(config)?;
        Ok(Self::new(session, AdvisorPanel::standard(knowledge)))
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Recommendations for the current hand.
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Greeting shown when the loop starts.
    pub fn banner(&self) -> String {
        format!(
            "INTERACTIVE POKER SIMULATOR\nStarting stack: ${}\n\n{}",
            money(self.session.ledger().starting_stack()),
            HELP
        )
    }

    /// Run one command.
    pub fn handle(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Command::Deal => {
                self.session.deal_random();
                Reply::show(self.present_hand(None))
            }
            Command::Scenario(name) => {
                let note = match ScenarioKind::parse(&name) {
                    Some(kind) => {
                        self.session.deal_scenario(kind);
                        None
                    }
                    None => {
                        self.session.deal_scenario(ScenarioKind::PremiumPair);
                        Some(format!("Unknown scenario '{}', dealing premium_pair", name))
                    }
                };
                Reply::show(self.present_hand(note))
            }
            Command::Act(input) => Reply::show(self.act(&input)),
            Command::Discuss(question) => {
                let Some(situation) = self.session.current() else {
                    return Reply::show(NO_HAND);
                };
                let discussion = discuss(&question, situation, &self.recommendations);
                Reply::show(display::discussion(&discussion))
            }
            Command::Stats => Reply::show(self.stats_text()),
            Command::History => Reply::show(display::history(self.session.ledger().records())),
            Command::Export(path) => match self.session.ledger().export_json(&path) {
                Ok(()) => Reply::show(format!("Hand history written to {}", path)),
                Err(err) => {
                    log::warn!("export failed: {}", err);
                    Reply::show(format!("Export failed: {}", err))
                }
            },
            Command::Reset => {
                self.session.reset();
                self.recommendations.clear();
                Reply::show(format!(
                    "Session reset! Stack back to ${}",
                    money(self.session.ledger().starting_stack())
                ))
            }
            Command::Help => Reply::show(HELP),
            Command::Quit => Reply {
                text: format!("Thanks for playing!\n{}", self.stats_text()),
                quit: true,
            },
            Command::Empty => Reply::show(""),
            Command::Unknown(_) => Reply::show("Unknown command. Type 'help' for available commands"),
        }
    }

    fn present_hand(&mut self, note: Option<String>) -> String {
        let Some(situation) = self.session.current() else {
            return NO_HAND.to_string();
        };
        self.recommendations = self.panel.consult(situation);
        let hand_number = self.session.ledger().records().len() + 1;

        let mut parts = Vec::new();
        if let Some(note) = note {
            parts.push(note);
        }
        parts.push(display::situation(situation, hand_number));
        parts.push(display::recommendations(&self.recommendations));
        parts.join("\n\n")
    }

    fn act(&mut self, input: &str) -> String {
        let Some(situation) = self.session.current() else {
            return NO_HAND.to_string();
        };
        let Some(action) = self.session.parse_action(input) else {
            return format!("Could not read action '{}'", input);
        };

        let mut parts = Vec::new();
        let check = RulesAdvisor.validate_action(&action, situation);
        if !check.is_valid {
            parts.push(display::rule_warnings(&check));
        }

        match self.session.play(action) {
            Some(record) => parts.push(display::hand_result(record)),
            None => parts.push(NO_HAND.to_string()),
        }
        self.recommendations.clear();
        parts.join("\n\n")
    }

    fn stats_text(&self) -> String {
        let ledger = self.session.ledger();
        display::stats(&ledger.stats(), ledger.recent(self.session.config().recent_hands))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(seed: u64) -> Simulator {
        colored::control::set_override(false);
        Simulator::from_config(SessionConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_action_without_hand() {
        let mut sim = simulator(1);
        assert_eq!(sim.handle("call").text, NO_HAND);
        assert_eq!(sim.handle("discuss odds?").text, NO_HAND);
        assert_eq!(sim.session().stats().hands_played, 0);
    }

    #[test]
    fn test_deal_and_act() {
        let mut sim = simulator(2);
        let dealt = sim.handle("new");
        assert!(dealt.text.contains("HAND #1"));
        assert!(dealt.text.contains("ADVISOR RECOMMENDATIONS:"));
        assert_eq!(sim.recommendations().len(), 4);

        let played = sim.handle("call");
        assert!(played.text.contains("HAND PROGRESSION (hand #1)"));
        assert!(!played.quit);
        assert!(sim.session().current().is_none());
        assert!(sim.recommendations().is_empty());
        assert_eq!(sim.session().stats().hands_played, 1);
    }

    #[test]
    fn test_scenario_and_min_raise_warning() {
        let mut sim = simulator(3);
        let dealt = sim.handle("scenario tough_decision");
        assert!(dealt.text.contains("Position: BB"));

        // bet to call is 1, so raising 1.5 is under the minimum of 2
        let played = sim.handle("raise 1.5");
        assert!(played.text.contains("Minimum raise is 2, you proposed 1.5"));
        assert!(played.text.contains("PREFLOP: You raise 1.5"));
    }

    #[test]
    fn test_unknown_scenario_falls_back() {
        let mut sim = simulator(4);
        let dealt = sim.handle("scenario moon_shot");
        assert!(dealt.text.starts_with("Unknown scenario 'moon_shot', dealing premium_pair"));
        assert!(dealt.text.contains("Hole Cards: Ah As"));
    }

    #[test]
    fn test_discuss_uses_panel() {
        let mut sim = simulator(5);
        sim.handle("scenario premium_pair");
        let reply = sim.handle("discuss raise or call?");
        assert!(reply.text.contains("ADVISOR DISCUSSION: raise or call?"));
        assert!(reply.text.contains("CONSOLIDATED RECOMMENDATION:"));
    }

    #[test]
    fn test_reset_stats_quit() {
        let mut sim = simulator(6);
        sim.handle("scenario pocket_pair");
        sim.handle("fold");
        assert!(sim.handle("stats").text.contains("Hands Played: 1"));

        let reset = sim.handle("reset");
        assert_eq!(reset.text, "Session reset! Stack back to $100");
        assert_eq!(sim.handle("stats").text, "No hands played yet!");

        let quit = sim.handle("quit");
        assert!(quit.quit);
        assert!(quit.text.starts_with("Thanks for playing!"));
    }

    #[test]
    fn test_unknown_and_help() {
        let mut sim = simulator(7);
        assert!(sim.handle("shove").text.starts_with("Unknown command"));
        assert_eq!(sim.handle("help").text, HELP);
        assert_eq!(sim.handle("   ").text, "");
    }

    #[test]
    fn test_export() {
        let mut sim = simulator(8);
        sim.handle("new");
        sim.handle("check");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hands.json");
        let reply = sim.handle(&format!("export {}", path.display()));
        assert!(reply.text.starts_with("Hand history written to"));
        assert!(path.exists());
    }
}
