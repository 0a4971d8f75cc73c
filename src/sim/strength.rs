//! Heuristic hand-strength scoring.
//!
//! The score is a coarse teaching heuristic, not an equity calculation:
//! a tier lookup on the hole cards, then multiplicative discounts for
//! boards that make flushes or straights possible.

use crate::cards::{Card, RANK_A, RANK_K};

/// Strength returned when fewer than two hole cards are supplied.
pub const DEFAULT_STRENGTH: f64 = 0.5;

/// Scoring tiers and board-texture factors.
///
/// Pocket pairs are scored by rank through `pair_by_rank` (index 0 = 22,
/// 12 = AA). Unpaired hands holding an `anchor_ranks` card use the
/// anchor values; other suited hands get `base + suited_bonus`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthTable {
    /// Score for unpaired, unsuited hands without an anchor card.
    pub base: f64,
    /// Pocket-pair score per rank.
    pub pair_by_rank: [f64; 13],
    /// Ranks that lift an unpaired hand to the anchor tier.
    pub anchor_ranks: &'static [u8],
    /// Anchor tier, suited.
    pub anchor_suited: f64,
    /// Anchor tier, offsuit.
    pub anchor_offsuit: f64,
    /// Added to `base` for other suited hands.
    pub suited_bonus: f64,
    /// Multiplier when the board shows at most two suits.
    pub flush_texture: f64,
    /// Multiplier when two board cards sit next to each other.
    pub straight_texture: f64,
}

const SMALL_PAIR: f64 = 0.65;
const STRONG_PAIR: f64 = 0.75;
const PREMIUM_PAIR: f64 = 0.85;

impl Default for StrengthTable {
    fn default() -> Self {
        Self {
            base: 0.4,
            //             2           3           4           5           6           7           8
            pair_by_rank: [SMALL_PAIR, SMALL_PAIR, SMALL_PAIR, SMALL_PAIR, SMALL_PAIR, SMALL_PAIR, SMALL_PAIR,
            //             9            T            J            Q             K             A
                           STRONG_PAIR, STRONG_PAIR, STRONG_PAIR, PREMIUM_PAIR, PREMIUM_PAIR, PREMIUM_PAIR],
            anchor_ranks: &[RANK_A, RANK_K],
            anchor_suited: 0.70,
            anchor_offsuit: 0.65,
            suited_bonus: 0.10,
            flush_texture: 0.9,
            straight_texture: 0.9,
        }
    }
}

/// Scores hole cards against a board.
#[derive(Debug, Clone, Default)]
pub struct HandStrengthEstimator {
    table: StrengthTable,
}

impl HandStrengthEstimator {
    /// Estimator with the standard tiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with a custom table.
    pub fn with_table(table: StrengthTable) -> Self {
        Self { table }
    }

    /// The tiers in use.
    pub fn table(&self) -> &StrengthTable {
        &self.table
    }

    /// Score `hole` on `board`, in `[0, 1]`.
    ///
    /// Only the first two hole cards are read; fewer than two yields
    /// [`DEFAULT_STRENGTH`].
    pub fn estimate(&self, hole: &[Card], board: &[Card]) -> f64 {
        let [first, second] = match hole {
            [a, b, ..] => [*a, *b],
            _ => return DEFAULT_STRENGTH,
        };

        let mut strength = self.preflop_tier(first, second);

        if !board.is_empty() {
            if flush_possible(board) {
                strength *= self.table.flush_texture;
            }
            if straight_possible(board) {
                strength *= self.table.straight_texture;
            }
        }

        strength.min(1.0)
    }

    /// Tier score from the hole cards alone.
    pub fn preflop_tier(&self, first: Card, second: Card) -> f64 {
        let t = &self.table;
        let suited = first.suit() == second.suit();

        if first.rank() == second.rank() {
            t.pair_by_rank[first.rank() as usize]
        } else if t.anchor_ranks.contains(&first.rank()) || t.anchor_ranks.contains(&second.rank()) {
            if suited {
                t.anchor_suited
            } else {
                t.anchor_offsuit
            }
        } else if suited {
            t.base + t.suited_bonus
        } else {
            t.base
        }
    }
}

/// Board shows two or fewer distinct suits.
pub fn flush_possible(board: &[Card]) -> bool {
    let mut seen = [false; 4];
    for card in board {
        seen[card.suit() as usize] = true;
    }
    seen.iter().filter(|&&s| s).count() <= 2
}

/// Two distinct board cards whose rank symbols are at most one character
/// code apart.
///
/// This compares the display characters ('2'..'9', 'T', 'J', 'Q', 'K', 'A'),
/// so J-K and paired boards count while Q-K and 9-T do not.
pub fn straight_possible(board: &[Card]) -> bool {
    board.iter().enumerate().any(|(i, a)| {
        board
            .iter()
            .enumerate()
            .any(|(j, b)| i != j && a != b && symbol_distance(*a, *b) <= 1)
    })
}

fn symbol_distance(a: Card, b: Card) -> u32 {
    (a.rank_char() as u32).abs_diff(b.rank_char() as u32)
}
