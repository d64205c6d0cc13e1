use serde::{Deserialize, Serialize};

/// A seat assignment, immutable for the duration of a hand.
/// Stack mutation during play is tracked on the hand state, not here.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Seat index, 0..N-1 in table order
    pub index: usize,
    /// Model identifier occupying this seat
    pub model: String,
    /// Chips behind at the start of the hand
    pub starting_stack: u32,
}

impl Seat {
    pub fn new(index: usize, model: impl Into<String>, starting_stack: u32) -> Self {
        Self {
            index,
            model: model.into(),
            starting_stack,
        }
    }
}

/// Whether a seat can still act in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// In the hand with chips behind
    Live,
    /// Surrendered the hand
    Folded,
    /// In the hand with no chips behind
    AllIn,
}

impl SeatStatus {
    /// Folded seats are out; live and all-in seats still contest the pot.
    pub fn in_hand(self) -> bool {
        !matches!(self, SeatStatus::Folded)
    }
}
