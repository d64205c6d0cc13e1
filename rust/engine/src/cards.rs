use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// One of the four suits in a standard 52-card deck.
/// The canonical text form is the lowercase letter used on the wire: `s`, `h`, `d`, `c`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs (`c`)
    Clubs,
    /// Diamonds (`d`)
    Diamonds,
    /// Hearts (`h`)
    Hearts,
    /// Spades (`s`)
    Spades,
}

impl Suit {
    pub fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Rank of a playing card from Two through Ace.
/// Numeric values (2..=14) are used for comparison and hand evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A single playing card. The canonical two-character form concatenates rank
/// and suit, e.g. `As` for the ace of spades; multi-card strings concatenate
/// cards without a separator (`AsKh`).
///
/// ```
/// use arena_engine::cards::Card;
///
/// let card: Card = "As".parse().unwrap();
/// assert_eq!(card.to_string(), "As");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r, u, rest) = (chars.next(), chars.next(), chars.next());
        match (r, u, rest) {
            (Some(r), Some(u), None) => {
                let rank = Rank::from_char(r);
                let suit = Suit::from_char(u);
                match (rank, suit) {
                    (Some(rank), Some(suit)) => Ok(Card { rank, suit }),
                    _ => Err(EngineError::BadCard(s.to_string())),
                }
            }
            _ => Err(EngineError::BadCard(s.to_string())),
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

/// Render a card slice in the canonical concatenated form (`AsKh`).
pub fn cards_to_string(cards: &[Card]) -> String {
    let mut s = String::with_capacity(cards.len() * 2);
    for c in cards {
        s.push(c.rank.to_char());
        s.push(c.suit.to_char());
    }
    s
}

/// Parse a concatenated card string (`Jc7d2s`) into cards.
/// Whitespace between cards is tolerated.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EngineError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(EngineError::BadCard(s.to_string()));
    }
    let chars: Vec<char> = compact.chars().collect();
    let mut out = Vec::with_capacity(chars.len() / 2);
    for pair in chars.chunks(2) {
        let rank = Rank::from_char(pair[0]);
        let suit = Suit::from_char(pair[1]);
        match (rank, suit) {
            (Some(rank), Some(suit)) => out.push(Card { rank, suit }),
            _ => return Err(EngineError::BadCard(format!("{}{}", pair[0], pair[1]))),
        }
    }
    Ok(out)
}
