//! Seven-card hand evaluation for showdown settlement.
//!
//! The evaluator reduces a seat's two hole cards plus the five-card board to
//! a [`HandRank`] that orders totally: first by category, then by up to five
//! kicker values. The pot settlement code only ever compares ranks; it never
//! inspects cards directly.

use std::cmp::Ordering;

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Total-ordered strength of the best five-card hand in a seven-card set.
///
/// ```
/// use arena_engine::cards::parse_cards;
/// use arena_engine::eval::{rank_seven, Category};
///
/// let cards = parse_cards("AhKhQhJhTh2c3d").unwrap();
/// let rank = rank_seven(&cards.try_into().unwrap());
/// assert_eq!(rank.category, Category::StraightFlush);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandRank {
    pub category: Category,
    /// Tie-break values, high to low; unused slots are zero.
    pub kickers: [u8; 5],
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.category.cmp(&other.category) {
            Ordering::Equal => self.kickers.cmp(&other.kickers),
            ord => ord,
        }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rank the best five-card hand available in exactly seven cards.
pub fn rank_seven(cards: &[Card; 7]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // indices 2..=14
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    // Straight flush
    if let Some(s) = flush_suit {
        let mut suited = by_suit[s].clone();
        suited.sort_unstable();
        suited.dedup();
        if let Some(high) = straight_high(&suited) {
            return HandRank {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    // Four of a kind
    if let Some(quad) = highest_with_count(&rank_counts, 4) {
        let kicker = (2..=14u8)
            .rev()
            .find(|&r| r != quad && rank_counts[r as usize] > 0)
            .unwrap_or(0);
        return HandRank {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    let mut singles: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }

    // Full house: trips plus the best remaining pair (a second set of trips
    // supplies the pair slot)
    if !trips.is_empty() {
        let pair_slot = trips.get(1).copied().or_else(|| pairs.first().copied());
        if let Some(p) = pair_slot {
            return HandRank {
                category: Category::FullHouse,
                kickers: [trips[0], p, 0, 0, 0],
            };
        }
    }

    // Flush
    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return HandRank {
            category: Category::Flush,
            kickers: k,
        };
    }

    // Straight
    let mut uniq: Vec<u8> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .collect();
    uniq.sort_unstable();
    if let Some(high) = straight_high(&uniq) {
        return HandRank {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    if let Some(&t) = trips.first() {
        let mut k = [t, 0, 0, 0, 0];
        for (slot, r) in k.iter_mut().skip(1).zip(singles.iter().take(2)) {
            *slot = *r;
        }
        return HandRank {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }

    if pairs.len() >= 2 {
        let spare = pairs
            .get(2)
            .copied()
            .into_iter()
            .chain(singles.iter().copied())
            .max()
            .unwrap_or(0);
        return HandRank {
            category: Category::TwoPair,
            kickers: [pairs[0], pairs[1], spare, 0, 0],
        };
    }

    if let Some(&p) = pairs.first() {
        let mut k = [p, 0, 0, 0, 0];
        for (slot, r) in k.iter_mut().skip(1).zip(singles.iter().take(3)) {
            *slot = *r;
        }
        return HandRank {
            category: Category::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    for (slot, r) in k.iter_mut().zip(singles.iter().take(5)) {
        *slot = *r;
    }
    HandRank {
        category: Category::HighCard,
        kickers: k,
    }
}

/// Rank a seat's hole cards against a five-card board.
pub fn rank_with_board(hole: [Card; 2], board: &[Card]) -> HandRank {
    debug_assert_eq!(board.len(), 5);
    let mut seven = [hole[0]; 7];
    seven[1] = hole[1];
    seven[2..].copy_from_slice(board);
    rank_seven(&seven)
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn highest_with_count(rank_counts: &[u8; 15], count: u8) -> Option<u8> {
    (2..=14u8).rev().find(|&r| rank_counts[r as usize] == count)
}

/// Highest straight top-card in an ascending, deduplicated rank list.
/// The ace doubles as a one for the wheel (A-2-3-4-5 tops at 5).
fn straight_high(sorted_unique: &[u8]) -> Option<u8> {
    if sorted_unique.is_empty() {
        return None;
    }
    let mut v = sorted_unique.to_vec();
    if v.binary_search(&14).is_ok() {
        v.insert(0, 1);
    }
    let mut run = 1;
    let mut best = 0u8;
    for i in 1..v.len() {
        if v[i] == v[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best = v[i];
            }
        } else {
            run = 1;
        }
    }
    if best == 0 {
        None
    } else {
        Some(best)
    }
}
