//! Street-by-street hand progression.
//!
//! A hand moves `Preflop -> Flop -> Turn -> River -> Showdown`. Folding
//! jumps straight to `Folded` from whatever street the hero was on. After a
//! non-fold action the missing board cards are dealt from the deck minus
//! every visible card, the pot grows by a street-specific betting amount,
//! and the hand is settled by the [`OutcomeResolver`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Board, Deck, Street};
use crate::random::RandomSource;
use crate::sim::action::{money, PlayerAction};
use crate::sim::outcome::{HandOutcome, OutcomeResolver};
use crate::sim::situation::{cents, Situation};
use crate::sim::strength::HandStrengthEstimator;

/// Extra pot added by betting on the turn (uniform, low..high).
pub const TURN_BETTING: (f64, f64) = (5.0, 15.0);
/// Extra pot added by betting on the river.
pub const RIVER_BETTING: (f64, f64) = (10.0, 25.0);

/// Opponent narration; "calls" carries twice the weight of "raises".
const OPPONENT_ACTIONS: [&str; 3] = ["calls", "raises", "calls"];

/// State of a hand in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Folded,
}

impl Phase {
    /// Following phase when the hand continues; `None` once terminal.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Preflop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => Some(Phase::Showdown),
            Phase::Showdown | Phase::Folded => None,
        }
    }

    /// Showdown or folded.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Showdown | Phase::Folded)
    }

    /// Board size on this street, for the dealing phases.
    pub fn board_cards(&self) -> Option<usize> {
        match self {
            Phase::Preflop => Some(0),
            Phase::Flop => Some(3),
            Phase::Turn => Some(4),
            Phase::River => Some(5),
            Phase::Showdown | Phase::Folded => None,
        }
    }

    /// Upper-case label used in the progression log.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Preflop => "PREFLOP",
            Phase::Flop => "FLOP",
            Phase::Turn => "TURN",
            Phase::River => "RIVER",
            Phase::Showdown => "SHOWDOWN",
            Phase::Folded => "FOLDED",
        }
    }
}

impl From<Street> for Phase {
    fn from(street: Street) -> Self {
        match street {
            Street::Preflop => Phase::Preflop,
            Street::Flop => Phase::Flop,
            Street::Turn => Phase::Turn,
            Street::River => Phase::River,
            Street::Showdown => Phase::Showdown,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One line of the hand log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    /// Phase the entry belongs to.
    pub phase: Phase,
    /// Board at this point.
    pub board: Board,
    /// Pot at this point.
    pub pot_size: f64,
    /// Amount the hero faced at this point.
    pub bet_to_call: f64,
    /// What happened.
    pub text: String,
    /// Strength estimate on this board, when one was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

/// Drives a single hand from the hero's action to showdown.
#[derive(Debug, Clone, Default)]
pub struct StreetProgression {
    estimator: HandStrengthEstimator,
    resolver: OutcomeResolver,
}

impl StreetProgression {
    /// Progression with the default estimator and resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom estimator.
    pub fn with_estimator(mut self, estimator: HandStrengthEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Use a custom resolver.
    pub fn with_resolver(mut self, resolver: OutcomeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The strength estimator in use.
    pub fn estimator(&self) -> &HandStrengthEstimator {
        &self.estimator
    }

    /// Play the hand out from `situation` after the hero's `action`.
    ///
    /// The situation must already be validated. Cards are never drawn twice:
    /// the deck excludes the hole cards and the starting board.
    pub fn advance<R: RandomSource + ?Sized>(
        &self,
        situation: &Situation,
        action: PlayerAction,
        rng: &mut R,
    ) -> HandOutcome {
        let hole = situation.hole_cards.cards();
        let start = Phase::from(situation.street());
        let mut board = situation.board.clone();
        let mut strength = self.estimator.estimate(&hole, board.cards());

        if action.is_fold() {
            let resolution = self.resolver.fold(situation.bet_to_call);
            let entry = ProgressionEntry {
                phase: start,
                board: board.clone(),
                pot_size: situation.pot_size,
                bet_to_call: situation.bet_to_call,
                text: format!("{}: You fold - hand ends", start.label()),
                strength: Some(strength),
            };
            return HandOutcome {
                scenario: situation.scenario,
                position: situation.position,
                hole_cards: situation.hole_cards,
                action,
                invested: situation.bet_to_call,
                final_pot: situation.pot_size,
                final_board: board,
                final_strength: strength,
                phase: Phase::Folded,
                resolution,
                progression: vec![entry],
            };
        }

        let invested = action.committed(situation.bet_to_call);
        let mut pot = situation.pot_size + invested;
        let mut log = vec![ProgressionEntry {
            phase: start,
            board: board.clone(),
            pot_size: pot,
            bet_to_call: situation.bet_to_call,
            text: format!("{}: You {}", start.label(), action),
            strength: Some(strength),
        }];

        let mut deck = Deck::without(&situation.visible_cards());
        let mut phase = start;
        while let Some(next) = phase.next() {
            let Some(target) = next.board_cards() else {
                break;
            };
            let needed = target.saturating_sub(board.len());
            let dealt = deck.deal_n(needed, rng);
            if dealt.len() < needed {
                log::warn!("{}: deck exhausted, street skipped", next);
                log.push(ProgressionEntry {
                    phase: next,
                    board: board.clone(),
                    pot_size: pot,
                    bet_to_call: 0.0,
                    text: format!("{}: skipped, not enough cards left", next.label()),
                    strength: None,
                });
                phase = next;
                continue;
            }
            for card in dealt {
                board.add(card);
            }

            pot += street_betting(next, rng);
            strength = self.estimator.estimate(&hole, board.cards());
            log::debug!("{} [{}] pot {:.2} strength {:.3}", next, board, pot, strength);

            log.push(ProgressionEntry {
                phase: next,
                board: board.clone(),
                pot_size: pot,
                bet_to_call: 0.0,
                text: format!("{}: {} (pot: ${})", next.label(), board, money(pot)),
                strength: Some(strength),
            });
            phase = next;
        }

        let opponent = OPPONENT_ACTIONS[rng.index(OPPONENT_ACTIONS.len())];
        log.push(ProgressionEntry {
            phase,
            board: board.clone(),
            pot_size: pot,
            bet_to_call: 0.0,
            text: format!("Opponent {}", opponent),
            strength: None,
        });
        log.push(ProgressionEntry {
            phase: Phase::Showdown,
            board: board.clone(),
            pot_size: pot,
            bet_to_call: 0.0,
            text: format!("SHOWDOWN: {} vs Opponent on {}", situation.hole_cards, board),
            strength: Some(strength),
        });

        let resolution = self.resolver.resolve(
            strength,
            situation.position,
            &action,
            pot,
            invested,
            rng,
        );

        HandOutcome {
            scenario: situation.scenario,
            position: situation.position,
            hole_cards: situation.hole_cards,
            action,
            invested,
            final_pot: pot,
            final_board: board,
            final_strength: strength,
            phase: Phase::Showdown,
            resolution,
            progression: log,
        }
    }
}

/// Pot added by opponents betting on a newly dealt street.
fn street_betting<R: RandomSource + ?Sized>(phase: Phase, rng: &mut R) -> f64 {
    let range = match phase {
        Phase::Turn => TURN_BETTING,
        Phase::River => RIVER_BETTING,
        _ => return 0.0,
    };
    cents(rng.uniform(range.0, range.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, HoleCards};
    use crate::random::{seeded, ScriptedSource};
    use crate::sim::outcome::Outcome;
    use crate::sim::situation::Position;

    fn aces_on_button() -> Situation {
        let hole: HoleCards = "Ah As".parse().unwrap();
        Situation::new(Position::BTN, hole)
            .with_pot(3.0)
            .with_bet_to_call(2.0)
            .with_opponents(2)
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(Phase::Preflop.next(), Some(Phase::Flop));
        assert_eq!(Phase::River.next(), Some(Phase::Showdown));
        assert_eq!(Phase::Showdown.next(), None);
        assert_eq!(Phase::Folded.next(), None);
        assert!(Phase::Folded.is_terminal());
        assert_eq!(Phase::from(Street::Turn), Phase::Turn);
    }

    #[test]
    fn test_fold_is_single_entry() {
        let situation = aces_on_button().with_bet_to_call(4.0);
        let mut rng = seeded(Some(1));
        let hand = StreetProgression::new().advance(&situation, PlayerAction::Fold, &mut rng);

        assert_eq!(hand.outcome(), Outcome::Fold);
        assert_eq!(hand.stack_delta(), -4.0);
        assert_eq!(hand.phase, Phase::Folded);
        assert_eq!(hand.progression.len(), 1);
        assert_eq!(hand.final_pot, 3.0);
        assert!(hand.final_board.is_empty());
        assert_eq!(hand.progression[0].text, "PREFLOP: You fold - hand ends");
    }

    #[test]
    fn test_raise_from_preflop_deals_all_streets() {
        let situation = aces_on_button();
        let mut rng = seeded(Some(42));
        let hand = StreetProgression::new().advance(&situation, PlayerAction::Raise(6.0), &mut rng);

        assert_eq!(hand.progression[0].pot_size, 9.0);
        assert_eq!(hand.progression[0].text, "PREFLOP: You raise 6");
        assert_eq!(hand.final_board.len(), 5);
        assert_eq!(hand.phase, Phase::Showdown);
        assert_eq!(hand.invested, 6.0);

        let hole = situation.hole_cards;
        for card in hand.final_board.cards() {
            assert!(!hole.contains(*card));
        }

        let phases: Vec<Phase> = hand.progression.iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![Phase::Preflop, Phase::Flop, Phase::Turn, Phase::River, Phase::River, Phase::Showdown]
        );

        // flop adds nothing; turn and river add their betting ranges
        assert_eq!(hand.progression[1].pot_size, 9.0);
        let turn = hand.progression[2].pot_size - 9.0;
        assert!((5.0..=15.0).contains(&turn));
        let river = hand.progression[3].pot_size - hand.progression[2].pot_size;
        assert!((10.0..=25.0).contains(&river));

        let expected = match hand.outcome() {
            Outcome::Win => hand.final_pot - 6.0,
            _ => -6.0,
        };
        assert!((hand.stack_delta() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_starting_on_turn_only_deals_river() {
        let hole: HoleCards = "Kh Qh".parse().unwrap();
        let situation = Situation::new(Position::CO, hole)
            .with_board("2c 7d 9s Jc".parse().unwrap())
            .unwrap()
            .with_pot(20.0);
        let mut rng = seeded(Some(3));
        let hand = StreetProgression::new().advance(&situation, PlayerAction::Call, &mut rng);

        assert_eq!(hand.final_board.len(), 5);
        assert_eq!(&hand.final_board.cards()[..4], situation.board.cards());
        assert_eq!(hand.progression[1].phase, Phase::River);
        assert!(hand.progression[1].text.starts_with("RIVER: 2c 7d 9s Jc "));
        assert_eq!(hand.progression.len(), 4);
    }

    #[test]
    fn test_scripted_hand() {
        // Preflop AhAs, check facing 2: deal 3 + 1 + 1 cards from the front
        // of the deck, fixed street betting, opponent calls, roll wins.
        let situation = aces_on_button();
        let mut src = ScriptedSource::constant(0.0);
        let hand = StreetProgression::new().advance(&situation, PlayerAction::Check, &mut src);

        assert_eq!(hand.invested, 2.0);
        // deck without Ah As, index 0 with swap_remove draws 2c then the back cards
        assert!(hand.final_board.contains(Card::from_id(0)));
        assert_eq!(hand.final_pot, 5.0 + 5.0 + 10.0);
        assert_eq!(hand.progression[4].text, "Opponent calls");
        assert_eq!(hand.outcome(), Outcome::Win);
        assert_eq!(hand.stack_delta(), 20.0 - 2.0);
    }

    #[test]
    fn test_final_strength_uses_completed_board() {
        let situation = aces_on_button();
        let mut rng = seeded(Some(9));
        let progression = StreetProgression::new();
        let hand = progression.advance(&situation, PlayerAction::Call, &mut rng);
        let expected = progression
            .estimator()
            .estimate(&situation.hole_cards.cards(), hand.final_board.cards());
        assert_eq!(hand.final_strength, expected);
    }
}
