//! Card representation for the hand simulator.
//!
//! This module provides the value types every other module works with:
//! - `Card`: A single playing card with rank and suit
//! - `HoleCards`: A player's two private cards
//! - `Board`: Community cards (0-5 cards)
//! - `Deck`: The remaining draw pool with uniform dealing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::RandomSource;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Rank characters for display.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Errors produced when parsing card notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    /// Token is not a two-character rank+suit pair.
    #[error("invalid card '{0}': expected rank+suit like 'Ah'")]
    Malformed(String),
    /// Rank character is not one of 2-9, T, J, Q, K, A.
    #[error("invalid rank '{0}'")]
    Rank(char),
    /// Suit character is not one of h, d, c, s.
    #[error("invalid suit '{0}'")]
    Suit(char),
    /// Wrong number of cards for the requested collection.
    #[error("expected {expected} cards, found {found}")]
    Count {
        /// Accepted card count(s).
        expected: &'static str,
        /// Number of cards parsed.
        found: usize,
    },
    /// The same card appears twice.
    #[error("duplicate card {0}")]
    Duplicate(Card),
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }

    /// Whether the suit prints red (hearts, diamonds).
    pub fn is_red(&self) -> bool {
        matches!(self.suit(), SUIT_HEARTS | SUIT_DIAMONDS)
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse a card from string like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            return Err(CardParseError::Malformed(s.to_string()));
        }

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == chars[0].to_ascii_uppercase())
            .ok_or(CardParseError::Rank(chars[0]))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == chars[1].to_ascii_lowercase())
            .ok_or(CardParseError::Suit(chars[1]))?;

        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Split card notation into two-character tokens.
///
/// Accepts both "Ah Ks" and "AhKs".
fn tokenize(s: &str) -> Result<Vec<Card>, CardParseError> {
    let compact: String = s.split_whitespace().collect();
    if compact.len() % 2 != 0 {
        return Err(CardParseError::Malformed(s.trim().to_string()));
    }
    let chars: Vec<char> = compact.chars().collect();
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse())
        .collect()
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Check if hole cards are suited.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if hole cards are a pair.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Rank-only class label, higher rank first ("AA", "AK", "T9").
    pub fn class_label(&self) -> String {
        format!("{}{}", self.card1.rank_char(), self.card2.rank_char())
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Check if a card conflicts with these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = CardParseError;

    /// Parse hole cards from string like "AhKs" or "Ah Ks".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = tokenize(s)?;
        if cards.len() != 2 {
            return Err(CardParseError::Count {
                expected: "2",
                found: cards.len(),
            });
        }
        if cards[0] == cards[1] {
            return Err(CardParseError::Duplicate(cards[0]));
        }
        Ok(Self::new(cards[0], cards[1]))
    }
}

impl TryFrom<String> for HoleCards {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HoleCards> for String {
    fn from(hole: HoleCards) -> Self {
        hole.to_string()
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Community cards on the board.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(5) }
    }

    /// Create a board from cards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        debug_assert!(cards.len() <= 5);
        Self { cards }
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Add a card to the board.
    pub fn add(&mut self, card: Card) {
        debug_assert!(self.cards.len() < 5);
        self.cards.push(card);
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Get the current street based on board cards, `None` for an
    /// impossible board size (1, 2 or more than 5 cards).
    pub fn street(&self) -> Option<Street> {
        Street::from_board_len(self.cards.len())
    }
}

impl FromStr for Board {
    type Err = CardParseError;

    /// Parse a board from string like "AhKsQd" or "Ah Ks Qd".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = tokenize(s)?;
        if cards.len() > 5 {
            return Err(CardParseError::Count {
                expected: "0-5",
                found: cards.len(),
            });
        }
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(CardParseError::Duplicate(*card));
            }
        }
        Ok(Self::from_cards(cards))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Street in a poker hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Street implied by a board of `len` cards.
    pub fn from_board_len(len: usize) -> Option<Street> {
        match len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    /// Upper-case label used in hand logs ("FLOP").
    pub fn label(&self) -> &'static str {
        match self {
            Street::Preflop => "PREFLOP",
            Street::Flop => "FLOP",
            Street::Turn => "TURN",
            Street::River => "RIVER",
            Street::Showdown => "SHOWDOWN",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
        }
    }
}

/// The undealt cards of a 52-card deck.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a full deck in standard order.
    pub fn new() -> Self {
        Self {
            cards: (0..52).map(Card::from_id).collect(),
        }
    }

    /// Create a deck with specific cards removed.
    pub fn without(dead_cards: &[Card]) -> Self {
        Self {
            cards: (0..52)
                .map(Card::from_id)
                .filter(|card| !dead_cards.contains(card))
                .collect(),
        }
    }

    /// Deal one card chosen uniformly from the remaining cards.
    pub fn deal<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let idx = rng.index(self.cards.len());
        Some(self.cards.swap_remove(idx))
    }

    /// Deal up to `n` cards; fewer if the deck runs out.
    pub fn deal_n<R: RandomSource + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<Card> {
        let mut cards = Vec::with_capacity(n);
        for _ in 0..n {
            match self.deal(rng) {
                Some(card) => cards.push(card),
                None => break,
            }
        }
        cards
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Check if a card is still in the deck.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{seeded, ScriptedSource};

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(RANK_A, SUIT_SPADES);
        assert_eq!(ace_spades.rank(), RANK_A);
        assert_eq!(ace_spades.suit(), SUIT_SPADES);
        assert_eq!(ace_spades.to_string(), "As");

        let two_clubs = Card::new(RANK_2, SUIT_CLUBS);
        assert_eq!(two_clubs.rank(), RANK_2);
        assert_eq!(two_clubs.suit(), SUIT_CLUBS);
        assert_eq!(two_clubs.to_string(), "2c");
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("As".parse::<Card>().unwrap().to_string(), "As");
        assert_eq!("Kh".parse::<Card>().unwrap().to_string(), "Kh");
        assert_eq!("td".parse::<Card>().unwrap().to_string(), "Td");
        assert_eq!("XX".parse::<Card>(), Err(CardParseError::Rank('X')));
        assert_eq!("Ax".parse::<Card>(), Err(CardParseError::Suit('x')));
        assert!(matches!("A".parse::<Card>(), Err(CardParseError::Malformed(_))));
    }

    #[test]
    fn test_hole_cards() {
        let hc: HoleCards = "Kh As".parse().unwrap();
        assert_eq!(hc.card1.rank(), RANK_A);
        assert_eq!(hc.card2.rank(), RANK_K);
        assert!(!hc.is_suited());
        assert!(!hc.is_pair());
        assert_eq!(hc.class_label(), "AK");
        assert_eq!(hc.to_string(), "As Kh");

        let suited: HoleCards = "AsKs".parse().unwrap();
        assert!(suited.is_suited());

        let pair: HoleCards = "AhAs".parse().unwrap();
        assert!(pair.is_pair());
        assert_eq!(pair.class_label(), "AA");

        assert_eq!(
            "AhAh".parse::<HoleCards>(),
            Err(CardParseError::Duplicate(Card::new(RANK_A, SUIT_HEARTS)))
        );
        assert!(matches!(
            "Ah".parse::<HoleCards>(),
            Err(CardParseError::Count { found: 1, .. })
        ));
    }

    #[test]
    fn test_board() {
        let mut board = Board::new();
        assert_eq!(board.street(), Some(Street::Preflop));

        board = "Ah Ks Qd".parse().unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.street(), Some(Street::Flop));
        assert_eq!(board.to_string(), "Ah Ks Qd");

        board.add("Jc".parse().unwrap());
        assert_eq!(board.street(), Some(Street::Turn));

        board.add("Tc".parse().unwrap());
        assert_eq!(board.street(), Some(Street::River));

        let odd: Board = "AhKs".parse().unwrap();
        assert_eq!(odd.street(), None);
        assert!("AhAh".parse::<Board>().is_err());
    }

    #[test]
    fn test_serde_uses_notation() {
        let hole: HoleCards = "Ah Kd".parse().unwrap();
        let json = serde_json::to_string(&hole).unwrap();
        assert_eq!(json, "\"Ah Kd\"");
        let board: Board = "2c 3d 4h".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[\"2c\",\"3d\",\"4h\"]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_deck_without() {
        let dead = vec!["As".parse().unwrap(), "Ah".parse().unwrap()];
        let deck = Deck::without(&dead);
        assert_eq!(deck.remaining(), 50);
        assert!(!deck.contains(dead[0]));
    }

    #[test]
    fn test_deck_deals_every_card_once() {
        let mut deck = Deck::new();
        let mut rng = seeded(Some(3));
        let cards = deck.deal_n(60, &mut rng);
        assert_eq!(cards.len(), 52);
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal(&mut rng).is_none());

        let mut ids: Vec<u8> = cards.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn test_deck_scripted_draw() {
        let mut deck = Deck::new();
        let mut src = ScriptedSource::constant(0.0);
        assert_eq!(deck.deal(&mut src), Some(Card::from_id(0)));
    }

    #[test]
    fn test_street_from_board() {
        assert_eq!(Street::from_board_len(0), Some(Street::Preflop));
        assert_eq!(Street::from_board_len(4), Some(Street::Turn));
        assert_eq!(Street::from_board_len(2), None);
        assert_eq!(Street::from_board_len(6), None);
        assert_eq!(Street::River.label(), "RIVER");
    }
}
