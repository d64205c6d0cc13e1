//! # arena-engine: Hold'em Hand Engine Core
//!
//! A deterministic No-Limit Texas Hold'em hand engine for 2-10 seats.
//! Provides the hand state machine, legal-action generation, pot and
//! side-pot settlement, and the snapshot types exchanged with decision
//! agents. Reproducible RNG makes every hand replayable from a seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the `As`/`Kh` text form
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - The hand state machine: dealing, blinds, streets, settlement
//! - [`actions`] - Seat actions, legal-action sets and the agent wire action
//! - [`eval`] - Seven-card hand ranking
//! - [`pot`] - Pot layering and side-pot settlement
//! - [`seat`] - Seat assignments and in-hand status
//! - [`snapshot`] - Per-seat game-state snapshots (contractual field names)
//! - [`history`] - Streets and betting-history events
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_engine::hand::{HandConfig, HandState};
//! use arena_engine::seat::Seat;
//!
//! let seats = vec![
//!     Seat::new(0, "openai/gpt-4o", 1_000),
//!     Seat::new(1, "anthropic/claude-sonnet-4-20250514", 1_000),
//! ];
//! let config = HandConfig {
//!     small_blind: 5,
//!     big_blind: 10,
//!     ante: 0,
//!     button: 0,
//! };
//! let hand = HandState::new(seats, config, 42).unwrap();
//!
//! // Heads-up the button posts the small blind and acts first preflop
//! assert_eq!(hand.actor(), Some(0));
//! assert_eq!(hand.pot(), 15);
//! ```

pub mod actions;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod eval;
pub mod hand;
pub mod history;
pub mod pot;
pub mod seat;
pub mod snapshot;
