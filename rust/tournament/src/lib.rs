//! # arena-tournament: Match and Tournament Drivers
//!
//! Composes hands into matches and tournaments: the async hand runner that
//! sequences agents through one hand, the heads-up / round-robin /
//! freeze-out drivers, the escalating blind schedule, and the persistent
//! ELO rating service.
//!
//! Scheduling model: within a hand and within a match everything is serial;
//! independent matches in a round robin may run in parallel under a bounded
//! cap. Cancellation tokens propagate to the next decision point, fold out
//! the seat to act, and mark the match cancelled.
//!
//! ## Core Modules
//!
//! - [`hands`] - One hand against live agents: snapshots, decisions, records
//! - [`heads_up`] - Fixed-length two-player matches with stack carry-over
//! - [`round_robin`] - All-pairs league with bounded parallelism
//! - [`full_table`] - Single-table freeze-out with eliminations
//! - [`blinds`] - Escalating blind schedule as a pure function of hand number
//! - [`elo`] - Match-grained ratings with atomic file persistence

pub mod blinds;
pub mod elo;
pub mod full_table;
pub mod hands;
pub mod heads_up;
pub mod round_robin;

pub use heads_up::{MatchEntry, MatchResult, MatchStatus};
