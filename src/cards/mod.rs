//! Card model for the simulator.
//!
//! - `Card`: a single playing card with rank and suit
//! - `HoleCards`: the hero's two private cards
//! - `Board`: community cards (0, 3, 4 or 5 cards)
//! - `Deck`: the draw pool, built without the cards already visible
//! - `Street`: preflop through showdown

pub mod card;

pub use card::{Board, Card, CardParseError, Deck, HoleCards, Street};
pub use card::{RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8, RANK_9};
pub use card::{RANK_A, RANK_J, RANK_K, RANK_Q, RANK_T};
pub use card::{SUIT_CLUBS, SUIT_DIAMONDS, SUIT_HEARTS, SUIT_SPADES};
