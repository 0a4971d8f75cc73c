//! The hand situation handed to the simulator and the advisors.
//!
//! A `Situation` is created fresh for every hand, either from a named
//! training scenario or dealt at random, and is validated here at the
//! boundary so the progression code can trust it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Board, Card, Deck, HoleCards, Street};
use crate::cards::{RANK_7, RANK_8, RANK_9, RANK_A, RANK_K, RANK_Q};
use crate::cards::{SUIT_DIAMONDS, SUIT_HEARTS, SUIT_SPADES};
use crate::random::RandomSource;
use crate::sim::config::SessionConfig;

/// Seat at a 6-max table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(alias = "EP")]
    UTG,
    #[serde(alias = "HJ", alias = "LJ")]
    MP,
    CO,
    #[serde(alias = "BU")]
    BTN,
    SB,
    BB,
}

impl Position {
    /// Short table name.
    pub fn name(&self) -> &'static str {
        match self {
            Position::UTG => "UTG",
            Position::MP => "MP",
            Position::CO => "CO",
            Position::BTN => "BTN",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }

    /// All seats in acting order.
    pub fn all() -> &'static [Position] {
        &[
            Position::UTG,
            Position::MP,
            Position::CO,
            Position::BTN,
            Position::SB,
            Position::BB,
        ]
    }

    /// Cutoff and button.
    pub fn is_late(&self) -> bool {
        matches!(self, Position::CO | Position::BTN)
    }

    /// Under the gun and middle position.
    pub fn is_early(&self) -> bool {
        matches!(self, Position::UTG | Position::MP)
    }

    /// Small and big blind.
    pub fn is_blind(&self) -> bool {
        matches!(self, Position::SB | Position::BB)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Position {
    type Err = SituationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utg" | "ep" => Ok(Position::UTG),
            "mp" | "mp1" | "mp2" | "hj" => Ok(Position::MP),
            "co" | "cutoff" => Ok(Position::CO),
            "btn" | "bu" | "button" => Ok(Position::BTN),
            "sb" => Ok(Position::SB),
            "bb" => Ok(Position::BB),
            _ => Err(SituationError::UnknownPosition(s.to_string())),
        }
    }
}

/// Problems found when building a situation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SituationError {
    /// Board must hold 0, 3, 4 or 5 cards.
    #[error("board must have 0, 3, 4 or 5 cards, got {0}")]
    BoardSize(usize),
    /// A card is visible twice across hole cards and board.
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    /// Pot, bet or stack is negative or not a number.
    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount {
        /// Offending field.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// Position name not recognised.
    #[error("unknown position '{0}'")]
    UnknownPosition(String),
}

/// Training scenarios with fixed hero cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    PremiumPair,
    ToughDecision,
    BluffSpot,
    PocketPair,
    DrawingHand,
}

impl ScenarioKind {
    /// Every scenario, in the order random dealing picks from.
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::PremiumPair,
        ScenarioKind::ToughDecision,
        ScenarioKind::BluffSpot,
        ScenarioKind::PocketPair,
        ScenarioKind::DrawingHand,
    ];

    /// Look up a scenario by name (case, spaces and dashes ignored).
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.iter().copied().find(|kind| kind.name() == wanted)
    }

    /// Like [`parse`](Self::parse), but unknown names give `PremiumPair`.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(ScenarioKind::PremiumPair)
    }

    /// Snake-case name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::PremiumPair => "premium_pair",
            ScenarioKind::ToughDecision => "tough_decision",
            ScenarioKind::BluffSpot => "bluff_spot",
            ScenarioKind::PocketPair => "pocket_pair",
            ScenarioKind::DrawingHand => "drawing_hand",
        }
    }

    /// One-line description shown above the table.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioKind::PremiumPair => "Premium pocket aces on the button",
            ScenarioKind::ToughDecision => "AQ in big blind facing action",
            ScenarioKind::BluffSpot => "Suited connector in late position",
            ScenarioKind::PocketPair => "Mid pocket pair in middle position",
            ScenarioKind::DrawingHand => "Suited broadways with drawing potential",
        }
    }

    /// Hero seat.
    pub fn position(&self) -> Position {
        match self {
            ScenarioKind::PremiumPair | ScenarioKind::DrawingHand => Position::BTN,
            ScenarioKind::ToughDecision => Position::BB,
            ScenarioKind::BluffSpot => Position::CO,
            ScenarioKind::PocketPair => Position::MP,
        }
    }

    /// Hero hole cards.
    pub fn hole_cards(&self) -> HoleCards {
        let (a, b) = match self {
            ScenarioKind::PremiumPair => (Card::new(RANK_A, SUIT_HEARTS), Card::new(RANK_A, SUIT_SPADES)),
            ScenarioKind::ToughDecision => (Card::new(RANK_A, SUIT_HEARTS), Card::new(RANK_Q, SUIT_DIAMONDS)),
            ScenarioKind::BluffSpot => (Card::new(RANK_7, SUIT_HEARTS), Card::new(RANK_8, SUIT_HEARTS)),
            ScenarioKind::PocketPair => (Card::new(RANK_9, SUIT_HEARTS), Card::new(RANK_9, SUIT_DIAMONDS)),
            ScenarioKind::DrawingHand => (Card::new(RANK_K, SUIT_HEARTS), Card::new(RANK_Q, SUIT_HEARTS)),
        };
        HoleCards::new(a, b)
    }

    /// Number of opponents at the table.
    pub fn opponents(&self) -> u32 {
        match self {
            ScenarioKind::PremiumPair | ScenarioKind::BluffSpot | ScenarioKind::DrawingHand => 2,
            ScenarioKind::ToughDecision => 3,
            ScenarioKind::PocketPair => 4,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Blinds posted before a named scenario starts.
const BLINDS_POT: f64 = 1.5;
const BIG_BLIND: f64 = 1.0;

/// One hand as seen by the hero before acting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Situation {
    /// Hero seat.
    pub position: Position,
    /// Hero hole cards.
    pub hole_cards: HoleCards,
    /// Community cards already dealt.
    pub board: Board,
    /// Chips in the middle.
    pub pot_size: f64,
    /// Chips the hero must add to continue.
    pub bet_to_call: f64,
    /// Opponents still in the hand.
    pub opponents: u32,
    /// Hero stack before acting.
    pub stack_size: f64,
    /// Scenario this hand was built from, if any.
    pub scenario: Option<ScenarioKind>,
}

impl Situation {
    /// Preflop situation with nothing in the pot.
    pub fn new(position: Position, hole_cards: HoleCards) -> Self {
        Self {
            position,
            hole_cards,
            board: Board::new(),
            pot_size: 0.0,
            bet_to_call: 0.0,
            opponents: 1,
            stack_size: 100.0,
            scenario: None,
        }
    }

    /// Situation for a named scenario with blinds posted.
    pub fn from_scenario(kind: ScenarioKind, stack: f64) -> Self {
        Self {
            pot_size: BLINDS_POT,
            bet_to_call: BIG_BLIND,
            opponents: kind.opponents(),
            stack_size: stack,
            scenario: Some(kind),
            ..Self::new(kind.position(), kind.hole_cards())
        }
    }

    /// Replace the board, checking its size and that no card repeats.
    pub fn with_board(mut self, board: Board) -> Result<Self, SituationError> {
        self.board = board;
        self.check_cards()?;
        Ok(self)
    }

    /// Set the pot.
    pub fn with_pot(mut self, pot: f64) -> Self {
        self.pot_size = pot;
        self
    }

    /// Set the bet to call.
    pub fn with_bet_to_call(mut self, bet: f64) -> Self {
        self.bet_to_call = bet;
        self
    }

    /// Set the opponent count.
    pub fn with_opponents(mut self, opponents: u32) -> Self {
        self.opponents = opponents;
        self
    }

    /// Set the hero stack.
    pub fn with_stack(mut self, stack: f64) -> Self {
        self.stack_size = stack;
        self
    }

    /// Street implied by the board.
    pub fn street(&self) -> Street {
        self.board.street().unwrap_or(Street::Preflop)
    }

    /// Every card the hero can see.
    pub fn visible_cards(&self) -> Vec<Card> {
        let mut cards = self.hole_cards.cards().to_vec();
        cards.extend_from_slice(self.board.cards());
        cards
    }

    /// `bet_to_call / (pot + bet_to_call)`, or `None` with nothing to call.
    pub fn pot_odds(&self) -> Option<f64> {
        if self.bet_to_call <= 0.0 {
            return None;
        }
        let total = self.pot_size + self.bet_to_call;
        if total <= 0.0 {
            return None;
        }
        Some(self.bet_to_call / total)
    }

    /// Full boundary check: board shape, duplicate cards, amounts.
    pub fn validate(&self) -> Result<(), SituationError> {
        self.check_cards()?;
        for (field, value) in [
            ("pot_size", self.pot_size),
            ("bet_to_call", self.bet_to_call),
            ("stack_size", self.stack_size),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SituationError::NegativeAmount { field, value });
            }
        }
        Ok(())
    }

    fn check_cards(&self) -> Result<(), SituationError> {
        if self.board.street().is_none() {
            return Err(SituationError::BoardSize(self.board.len()));
        }
        let cards = self.visible_cards();
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(SituationError::DuplicateCard(*card));
            }
        }
        Ok(())
    }
}

/// Deal a random hand for the given bankroll.
///
/// Picks a scenario for the hole cards, then randomises seat, pot, bet to
/// call and opponents within the configured ranges. With
/// `board_probability` the hand starts on the flop, turn or river; the
/// board is drawn from the deck without the hole cards.
pub fn random_situation<R: RandomSource + ?Sized>(
    config: &SessionConfig,
    stack: f64,
    rng: &mut R,
) -> Situation {
    let kind = ScenarioKind::ALL[rng.index(ScenarioKind::ALL.len())];
    let positions = Position::all();
    let position = positions[rng.index(positions.len())];

    let pot = cents(rng.uniform(config.pot_range.0, config.pot_range.1));
    let bet = cents(rng.uniform(config.bet_to_call_range.0, config.bet_to_call_range.1));
    let opponents = rng.between(config.opponent_range.0, config.opponent_range.1);

    let mut situation = Situation {
        position,
        pot_size: pot,
        bet_to_call: bet,
        opponents,
        ..Situation::from_scenario(kind, stack)
    };

    if rng.chance(config.board_probability) {
        let size = [3, 4, 5][rng.index(3)];
        let mut deck = Deck::without(&situation.hole_cards.cards());
        situation.board = Board::from_cards(deck.deal_n(size, rng));
    }

    log::debug!(
        "dealt {} {} at {} on [{}], pot {:.2}, to call {:.2}",
        kind,
        situation.hole_cards,
        situation.position,
        situation.board,
        situation.pot_size,
        situation.bet_to_call
    );
    situation
}

/// Round to whole cents.
pub fn cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
