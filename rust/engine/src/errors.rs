use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unparseable card: {0}")]
    BadCard(String),
    #[error("table needs 2..=10 seats, got {0}")]
    BadSeatCount(usize),
    #[error("button index {button} out of range for {seats} seats")]
    BadButton { button: usize, seats: usize },
    #[error("seat {0} has no chips at hand start")]
    EmptySeat(usize),
    #[error("no seat to act")]
    NoActor,
    #[error("it is seat {expected}'s turn, not seat {actual}'s")]
    OutOfTurn { expected: usize, actual: usize },
    #[error("hand is already complete")]
    HandComplete,
    #[error("{action} is not legal here")]
    IllegalAction { action: &'static str },
    #[error("raise to {amount} outside legal range {min_to}..={max_to}")]
    RaiseOutOfRange { amount: u32, min_to: u32, max_to: u32 },
    #[error("deck exhausted while dealing")]
    DeckExhausted,
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
