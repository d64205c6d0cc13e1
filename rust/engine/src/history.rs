use serde::{Deserialize, Serialize};

/// A betting street of Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

/// One voluntary action in the hand's betting history. Field names are part
/// of the snapshot contract seen by agents.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingEvent {
    /// Seat index of the actor
    pub player: usize,
    /// Model occupying the seat
    pub model: String,
    /// "fold" | "check" | "call" | "raise"
    pub action: String,
    /// Chips moved by this action (for raise, the street to-amount)
    pub amount: u32,
    pub street: Street,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Street::Preflop).unwrap(),
            serde_json::json!("preflop")
        );
    }

    #[test]
    fn street_order_is_play_order() {
        assert!(Street::Preflop < Street::Flop);
        assert_eq!(Street::Turn.next(), Some(Street::River));
        assert_eq!(Street::River.next(), None);
    }
}
