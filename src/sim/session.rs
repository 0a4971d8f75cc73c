//! A play session: one bankroll, one hand in flight at a time.

use crate::random::{seeded, RandomSource};
use crate::sim::action::PlayerAction;
use crate::sim::config::{ConfigError, SessionConfig};
use crate::sim::ledger::{OutcomeRecord, SessionLedger, SessionStats};
use crate::sim::progression::StreetProgression;
use crate::sim::situation::{random_situation, ScenarioKind, Situation, SituationError};

/// Owns everything that lives for the length of a session.
///
/// All randomness goes through the boxed [`RandomSource`], so a session
/// built with a fixed seed or a scripted source replays identically.
///
/// # Example
/// ```
/// use poker_coach::sim::{PlayerAction, ScenarioKind, Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::default().with_seed(7)).unwrap();
/// session.deal_scenario(ScenarioKind::PremiumPair);
/// let record = session.play(PlayerAction::Fold).unwrap();
/// assert_eq!(record.stack_delta, -1.0);
/// ```
pub struct Session {
    config: SessionConfig,
    ledger: SessionLedger,
    progression: StreetProgression,
    rng: Box<dyn RandomSource + Send>,
    current: Option<Situation>,
}

impl Session {
    /// Start a session; seeds from `config.seed` or entropy.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let rng = seeded(config.seed);
        Self::with_random_source(config, Box::new(rng))
    }

    /// Start a session drawing from the given source.
    pub fn with_random_source(
        config: SessionConfig,
        rng: Box<dyn RandomSource + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ledger: SessionLedger::new(config.starting_stack),
            config,
            progression: StreetProgression::new(),
            rng,
            current: None,
        })
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Hand history and bankroll.
    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    /// Shorthand for `ledger().stats()`.
    pub fn stats(&self) -> SessionStats {
        self.ledger.stats()
    }

    /// Hand waiting for the hero's action, if any.
    pub fn current(&self) -> Option<&Situation> {
        self.current.as_ref()
    }

    /// Deal a random hand, replacing any unfinished one.
    pub fn deal_random(&mut self) -> &Situation {
        let stack = self.ledger.current_stack();
        let situation = random_situation(&self.config, stack, self.rng.as_mut());
        self.current.insert(situation)
    }

    /// Deal a named training scenario.
    pub fn deal_scenario(&mut self, kind: ScenarioKind) -> &Situation {
        let situation = Situation::from_scenario(kind, self.ledger.current_stack());
        log::debug!("scenario {}: {}", kind, kind.description());
        self.current.insert(situation)
    }

    /// Start a hand from a caller-built situation after validating it.
    pub fn begin(&mut self, situation: Situation) -> Result<&Situation, SituationError> {
        situation.validate()?;
        let current: &Situation = self.current.insert(situation);
        Ok(current)
    }

    /// Parse `input` against the current hand's bet to call.
    ///
    /// `None` if there is no hand or the input is not an action.
    pub fn parse_action(&self, input: &str) -> Option<PlayerAction> {
        let situation = self.current.as_ref()?;
        PlayerAction::parse(input, situation.bet_to_call)
    }

    /// Play the current hand to the end and book it.
    ///
    /// Returns `None` when no hand has been dealt.
    pub fn play(&mut self, action: PlayerAction) -> Option<&OutcomeRecord> {
        let situation = self.current.take()?;
        let hand = self.progression.advance(&situation, action, self.rng.as_mut());
        Some(self.ledger.record(hand))
    }

    /// Back to the starting stack with an empty history.
    pub fn reset(&mut self) {
        self.ledger = SessionLedger::new(self.config.starting_stack);
        self.current = None;
        log::info!("session reset to {:.2}", self.config.starting_stack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use crate::sim::outcome::Outcome;

    #[test]
    fn test_play_without_hand() {
        let mut session = Session::new(SessionConfig::default().with_seed(1)).unwrap();
        assert!(session.current().is_none());
        assert!(session.play(PlayerAction::Call).is_none());
        assert!(session.parse_action("call").is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SessionConfig::default().with_starting_stack(-5.0);
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_hand_consumes_situation() {
        let mut session = Session::new(SessionConfig::default().with_seed(2)).unwrap();
        session.deal_random();
        let action = session.parse_action("call").unwrap();
        assert_eq!(action, PlayerAction::Call);
        assert!(session.play(action).is_some());
        assert!(session.current().is_none());
        assert_eq!(session.stats().hands_played, 1);
    }

    #[test]
    fn test_scripted_win_then_reset() {
        let config = SessionConfig::default();
        let mut session =
            Session::with_random_source(config, Box::new(ScriptedSource::constant(0.0))).unwrap();
        session.deal_scenario(ScenarioKind::PremiumPair);
        let record = session.play(PlayerAction::Raise(6.0)).unwrap();
        assert_eq!(record.outcome, Outcome::Win);
        // pot 1.5 + 6, turn +5, river +10
        assert_eq!(record.final_pot, 22.5);
        assert_eq!(record.stack_delta, 16.5);
        assert_eq!(session.ledger().current_stack(), 116.5);

        session.reset();
        assert_eq!(session.ledger().current_stack(), 100.0);
        assert_eq!(session.stats().hands_played, 0);
    }

    #[test]
    fn test_begin_validates() {
        let mut session = Session::new(SessionConfig::default().with_seed(3)).unwrap();
        let bad = Situation::from_scenario(ScenarioKind::BluffSpot, 100.0).with_pot(f64::NAN);
        assert!(session.begin(bad).is_err());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_next_hand_uses_current_stack() {
        let mut session = Session::new(SessionConfig::default().with_seed(4)).unwrap();
        session.deal_scenario(ScenarioKind::PocketPair);
        session.play(PlayerAction::Fold);
        let situation = session.deal_random();
        assert_eq!(situation.stack_size, 99.0);
    }
}
