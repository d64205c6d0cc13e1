//! Orchestration of one hand against live agents.
//!
//! The engine owns the cards and the rules; this runner owns the
//! conversation with the seats. At each decision point it snapshots the
//! table for the seat to act, awaits that seat's agent (seats are strictly
//! serial within a hand), applies the action, and logs the decision.
//! Pipeline output is trusted but verified: an action outside the legal set
//! is substituted with the safe default and flagged, and the hand continues.
//! Cancellation folds out the seat to act and marks the record.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use arena_agents::{DecisionOutcome, SeatAgent, ToolCallLog};
use arena_engine::actions::{ActionKind, AgentAction, SeatAction};
use arena_engine::cards::cards_to_string;
use arena_engine::errors::EngineError;
use arena_engine::hand::{HandConfig, HandState};
use arena_engine::history::Street;
use arena_engine::seat::Seat;
use arena_engine::snapshot::TableSnapshot;

#[derive(Debug, Error)]
pub enum HandError {
    /// The engine detected internal inconsistency; the hand is void and the
    /// match must be failed without touching ratings.
    #[error("engine invariant violation: {0}")]
    Invariant(EngineError),
    #[error("engine rejected setup: {0}")]
    Setup(EngineError),
}

/// One logged decision, in action order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub seat: usize,
    pub model: String,
    pub street: Street,
    pub action: AgentAction,
    pub parsed_ok: bool,
    pub clarified: bool,
    pub default_used: bool,
    /// True when the runner had to replace an illegal pipeline action
    pub substituted: bool,
    pub latency_ms: u64,
    pub total_tokens: u32,
    pub cost_usd: f64,
    pub tool_calls: Vec<ToolCallLog>,
    pub error: Option<String>,
}

/// Full record of one completed (or cancelled) hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_number: u64,
    pub seed: u64,
    pub board: String,
    pub pot: u32,
    pub final_stacks: Vec<u32>,
    pub profits: Vec<i64>,
    pub reached_showdown: bool,
    pub decisions: Vec<DecisionRecord>,
    pub cancelled: bool,
    pub total_tokens: u64,
    pub total_cost: f64,
    /// RFC3339 completion timestamp
    pub ts: String,
}

/// Play one hand to completion.
///
/// `agents` are indexed by seat. The hand's deck is seeded with `seed`, so
/// a fixed seed and deterministic agents replay the hand exactly.
pub async fn play_hand(
    agents: &[Arc<dyn SeatAgent>],
    seats: Vec<Seat>,
    config: HandConfig,
    hand_number: u64,
    seed: u64,
    cancel: &CancellationToken,
) -> Result<HandRecord, HandError> {
    debug_assert_eq!(agents.len(), seats.len());
    let mut hand = HandState::new(seats, config, seed).map_err(HandError::Setup)?;
    let mut decisions: Vec<DecisionRecord> = Vec::new();
    let mut cancelled = false;

    while !hand.is_complete() {
        let seat = match hand.actor() {
            Some(s) => s,
            None => break,
        };
        let snapshot = hand.snapshot_for(seat);

        if cancel.is_cancelled() {
            cancelled = true;
            apply_checked(&mut hand, seat, SeatAction::Fold)?;
            continue;
        }

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                cancelled = true;
                apply_checked(&mut hand, seat, SeatAction::Fold)?;
                continue;
            }
            outcome = agents[seat].decide(&snapshot) => outcome,
        };

        let (action, substituted) = resolve_action(&snapshot, &outcome);
        if substituted {
            tracing::warn!(
                seat,
                model = %snapshot.players[seat].model_name,
                requested = ?outcome.action,
                applied = ?action,
                "pipeline returned an illegal action, substituting default"
            );
        }
        apply_checked(&mut hand, seat, action)?;

        decisions.push(DecisionRecord {
            seat,
            model: snapshot.players[seat].model_name.clone(),
            street: snapshot.street,
            action: outcome.action,
            parsed_ok: outcome.parsed_ok,
            clarified: outcome.clarified,
            default_used: outcome.default_used,
            substituted,
            latency_ms: outcome.latency_ms,
            total_tokens: outcome.tokens.total_tokens,
            cost_usd: outcome.cost_usd,
            tool_calls: outcome.tool_calls,
            error: outcome.error,
        });
    }

    let outcome = hand.outcome().expect("completed hand has an outcome");
    let record = HandRecord {
        hand_number,
        seed,
        board: cards_to_string(hand.board()),
        pot: outcome.pot,
        final_stacks: outcome.final_stacks.clone(),
        profits: outcome.profits.clone(),
        reached_showdown: outcome.reached_showdown,
        total_tokens: decisions.iter().map(|d| d.total_tokens as u64).sum(),
        total_cost: decisions.iter().map(|d| d.cost_usd).sum(),
        decisions,
        cancelled,
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    tracing::debug!(
        hand_number,
        pot = record.pot,
        showdown = record.reached_showdown,
        decisions = record.decisions.len(),
        "hand complete"
    );
    Ok(record)
}

/// Map a wire action onto the engine, substituting the safe default when it
/// is not a member of the legal set (defensive; C1's clamping should make
/// this unreachable).
fn resolve_action(snapshot: &TableSnapshot, outcome: &DecisionOutcome) -> (SeatAction, bool) {
    let legal = snapshot.legal_amounts();
    if outcome.action.is_legal(&legal) {
        let action = match outcome.action.kind {
            ActionKind::Fold => SeatAction::Fold,
            ActionKind::Check => SeatAction::Check,
            ActionKind::Call => SeatAction::Call,
            ActionKind::Raise => {
                let to = outcome
                    .action
                    .amount
                    .or(legal.min_raise_to)
                    .unwrap_or_default();
                SeatAction::RaiseTo(to)
            }
        };
        (action, false)
    } else if legal.can_check {
        (SeatAction::Check, true)
    } else {
        (SeatAction::Fold, true)
    }
}

/// Apply an action, distinguishing fatal invariant violations from the
/// impossible-by-construction rejections.
fn apply_checked(hand: &mut HandState, seat: usize, action: SeatAction) -> Result<(), HandError> {
    match hand.apply(seat, action) {
        Ok(()) => Ok(()),
        Err(e @ EngineError::InvariantViolation(_)) => Err(HandError::Invariant(e)),
        Err(e) => Err(HandError::Invariant(EngineError::InvariantViolation(
            format!("engine rejected runner action: {e}"),
        ))),
    }
}

/// Append a hand record to a JSONL history file.
pub fn append_hand_record(
    path: &std::path::Path,
    record: &HandRecord,
) -> std::io::Result<()> {
    use std::io::Write as _;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
    writeln!(f, "{line}")
}
