//! Single-table freeze-out: play until one player holds all the chips.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use arena_agents::SeatAgent;
use arena_engine::hand::HandConfig;
use arena_engine::seat::Seat;

use crate::blinds::BlindSchedule;
use crate::hands::{play_hand, HandRecord};
use crate::heads_up::MatchStatus;

pub const MAX_PLAYERS: usize = 8;
pub const DEFAULT_MAX_HANDS: u64 = 1_000;

#[derive(Debug, Clone)]
pub struct FreezeOutConfig {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub hands_per_level: u32,
    pub blind_multiplier: f64,
    /// Hard ceiling; survivors are ranked by stack when it is reached
    pub max_hands: u64,
    pub seed: Option<u64>,
}

impl Default for FreezeOutConfig {
    fn default() -> Self {
        Self {
            starting_stack: 1_500_000,
            small_blind: 5_000,
            big_blind: 10_000,
            hands_per_level: 20,
            blind_multiplier: 1.5,
            max_hands: DEFAULT_MAX_HANDS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FreezeOutStanding {
    pub seat: usize,
    pub model: String,
    pub final_stack: u32,
    /// 1 = champion; eliminated players rank by how long they lasted
    pub position: usize,
    /// Hand number of the bust-out, `None` for survivors
    pub eliminated_at: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct FreezeOutResult {
    pub status: MatchStatus,
    pub standings: Vec<FreezeOutStanding>,
    pub hands_played: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    #[serde(skip)]
    pub hands: Vec<HandRecord>,
}

/// Run a freeze-out for 2..=8 agents seated in the given order.
///
/// The button advances one live seat per hand and skips eliminated seats.
/// Players busting on the same hand rank by seat order. If `max_hands` is
/// reached, survivors rank by stack, ties broken by seat index.
pub async fn run_freeze_out(
    agents: &[Arc<dyn SeatAgent>],
    config: FreezeOutConfig,
    cancel: &CancellationToken,
) -> FreezeOutResult {
    let n = agents.len();
    assert!((2..=MAX_PLAYERS).contains(&n), "freeze-out takes 2..=8 players");

    let schedule = BlindSchedule::new(config.small_blind, config.big_blind)
        .with_pacing(config.hands_per_level, config.blind_multiplier);
    let seed_base = config.seed.unwrap_or_else(rand::random);
    let models: Vec<String> = agents.iter().map(|a| a.model().to_string()).collect();
    tracing::info!(players = n, starting_stack = config.starting_stack, "freeze-out starting");

    let mut stacks: Vec<u32> = vec![config.starting_stack; n];
    let mut alive: Vec<bool> = vec![true; n];
    // (seat, hand busted), in elimination order
    let mut eliminations: Vec<(usize, u64)> = Vec::new();
    let mut button = 0usize;
    let mut hand_number = 0u64;
    let mut records: Vec<HandRecord> = Vec::new();
    let mut status = MatchStatus::Completed;

    while alive.iter().filter(|&&a| a).count() > 1 && hand_number < config.max_hands {
        if cancel.is_cancelled() {
            status = MatchStatus::Cancelled;
            break;
        }
        hand_number += 1;
        let level = schedule.level_for(hand_number);

        // Seat the live players in table order; remember their table seats
        let live: Vec<usize> = (0..n).filter(|&i| alive[i]).collect();
        let seats: Vec<Seat> = live
            .iter()
            .enumerate()
            .map(|(k, &orig)| Seat::new(k, models[orig].clone(), stacks[orig]))
            .collect();
        let hand_button = live
            .iter()
            .position(|&orig| orig == button)
            .expect("button sits on a live seat");
        let hand_config = HandConfig {
            small_blind: level.small_blind,
            big_blind: level.big_blind,
            ante: level.ante,
            button: hand_button,
        };
        let hand_agents: Vec<Arc<dyn SeatAgent>> =
            live.iter().map(|&orig| Arc::clone(&agents[orig])).collect();

        match play_hand(
            &hand_agents,
            seats,
            hand_config,
            hand_number,
            seed_base.wrapping_add(hand_number),
            cancel,
        )
        .await
        {
            Ok(record) => {
                for (k, &orig) in live.iter().enumerate() {
                    stacks[orig] = record.final_stacks[k];
                }
                let was_cancelled = record.cancelled;
                records.push(record);

                // Bust-outs rank by seat order within the same hand
                for seat in 0..n {
                    if alive[seat] && stacks[seat] == 0 {
                        alive[seat] = false;
                        eliminations.push((seat, hand_number));
                        tracing::info!(
                            seat,
                            model = %models[seat],
                            hand_number,
                            "player eliminated"
                        );
                    }
                }

                if was_cancelled {
                    status = MatchStatus::Cancelled;
                    break;
                }
            }
            Err(e) => {
                tracing::error!(hand_number, error = %e, "hand failed, aborting tournament");
                status = MatchStatus::Failed;
                break;
            }
        }

        button = next_live_seat(button, &alive).unwrap_or(button);

        if schedule.level_for(hand_number + 1).level > level.level {
            let next = schedule.level_for(hand_number + 1);
            tracing::info!(
                level = next.level,
                small_blind = next.small_blind,
                big_blind = next.big_blind,
                ante = next.ante,
                "blinds increased"
            );
        }
    }

    build_result(&models, &stacks, eliminations, hand_number, records, status)
}

fn next_live_seat(from: usize, alive: &[bool]) -> Option<usize> {
    let n = alive.len();
    (1..=n).map(|i| (from + i) % n).find(|&i| alive[i])
}

fn build_result(
    models: &[String],
    stacks: &[u32],
    eliminations: Vec<(usize, u64)>,
    hands_played: u64,
    records: Vec<HandRecord>,
    status: MatchStatus,
) -> FreezeOutResult {
    let n = models.len();
    let mut standings: Vec<FreezeOutStanding> = Vec::with_capacity(n);

    // Survivors rank from the top: stack desc, seat index breaks ties
    let mut survivors: Vec<usize> = (0..n)
        .filter(|&i| !eliminations.iter().any(|&(seat, _)| seat == i))
        .collect();
    survivors.sort_by(|&a, &b| stacks[b].cmp(&stacks[a]).then(a.cmp(&b)));
    for (rank, &seat) in survivors.iter().enumerate() {
        standings.push(FreezeOutStanding {
            seat,
            model: models[seat].clone(),
            final_stack: stacks[seat],
            position: rank + 1,
            eliminated_at: None,
        });
    }

    // Eliminated players fill the bottom: last out places highest
    let survivor_count = survivors.len();
    for (order, &(seat, hand)) in eliminations.iter().rev().enumerate() {
        standings.push(FreezeOutStanding {
            seat,
            model: models[seat].clone(),
            final_stack: 0,
            position: survivor_count + order + 1,
            eliminated_at: Some(hand),
        });
    }

    FreezeOutResult {
        status,
        hands_played,
        total_tokens: records.iter().map(|r| r.total_tokens).sum(),
        total_cost: records.iter().map(|r| r.total_cost).sum(),
        standings,
        hands: records,
    }
}
