//! Fixed-length heads-up matches with stack carry-over.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use arena_agents::SeatAgent;
use arena_engine::hand::HandConfig;
use arena_engine::seat::Seat;

use crate::blinds::BlindSchedule;
use crate::elo::EloService;
use crate::hands::{append_hand_record, play_hand, HandRecord};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// One model's line in a match result.
#[derive(Debug, Clone, Serialize)]
pub struct MatchEntry {
    pub model: String,
    pub final_stack: u32,
    pub profit: i64,
    /// 1-based; ties share the better position
    pub finishing_position: usize,
}

/// Result of a match between two or more models.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    pub entries: Vec<MatchEntry>,
    pub hands_played: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    /// Decisions that did not parse cleanly (clarified or defaulted)
    pub parse_failures: u64,
    /// Unique top stack, `None` on a tie
    pub winner: Option<String>,
    #[serde(skip)]
    pub hands: Vec<HandRecord>,
}

impl MatchResult {
    /// Commit this match to the rating service. Only completed two-player
    /// matches move ratings; failed or cancelled matches never do.
    pub fn commit_ratings(&self, elo: &EloService) {
        if self.status != MatchStatus::Completed || self.entries.len() != 2 {
            return;
        }
        match &self.winner {
            Some(winner) => {
                let loser = self
                    .entries
                    .iter()
                    .map(|e| &e.model)
                    .find(|m| *m != winner)
                    .expect("two entries");
                elo.record_match(winner, loser);
            }
            None => {
                elo.record_draw(&self.entries[0].model, &self.entries[1].model);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadsUpConfig {
    pub num_hands: u64,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Escalate blinds on the geometric schedule
    pub escalate: bool,
    pub hands_per_level: u32,
    pub blind_multiplier: f64,
    /// Base RNG seed; each hand uses `seed + hand_number`
    pub seed: Option<u64>,
    /// Append completed hand records to this JSONL file
    pub history_path: Option<PathBuf>,
}

impl Default for HeadsUpConfig {
    fn default() -> Self {
        Self {
            num_hands: 100,
            starting_stack: 1_500_000,
            small_blind: 5_000,
            big_blind: 10_000,
            escalate: false,
            hands_per_level: 20,
            blind_multiplier: 1.5,
            seed: None,
            history_path: None,
        }
    }
}

/// Runs a heads-up match between two agents. Stacks carry forward between
/// hands, the button alternates every hand, and the match ends after
/// `num_hands` hands or as soon as a stack is empty.
pub struct HeadsUpMatch {
    agents: [Arc<dyn SeatAgent>; 2],
    config: HeadsUpConfig,
}

impl HeadsUpMatch {
    pub fn new(agents: [Arc<dyn SeatAgent>; 2], config: HeadsUpConfig) -> Self {
        Self { agents, config }
    }

    pub async fn run(&self, cancel: &CancellationToken) -> MatchResult {
        let cfg = &self.config;
        let schedule = if cfg.escalate {
            BlindSchedule::new(cfg.small_blind, cfg.big_blind)
                .with_pacing(cfg.hands_per_level, cfg.blind_multiplier)
        } else {
            BlindSchedule::flat(cfg.small_blind, cfg.big_blind)
        };
        let seed_base = cfg.seed.unwrap_or_else(rand::random);
        let models = [
            self.agents[0].model().to_string(),
            self.agents[1].model().to_string(),
        ];
        tracing::info!(
            model_a = %models[0],
            model_b = %models[1],
            hands = cfg.num_hands,
            starting_stack = cfg.starting_stack,
            "heads-up match starting"
        );

        let mut stacks = [cfg.starting_stack, cfg.starting_stack];
        let mut records: Vec<HandRecord> = Vec::new();
        let mut status = MatchStatus::Completed;

        for hand_number in 1..=cfg.num_hands {
            if stacks.iter().any(|&s| s == 0) {
                tracing::info!(hand_number, "player busted, match over");
                break;
            }
            if cancel.is_cancelled() {
                status = MatchStatus::Cancelled;
                break;
            }

            let level = schedule.level_for(hand_number);
            let button = ((hand_number - 1) % 2) as usize;
            let seats = vec![
                Seat::new(0, models[0].clone(), stacks[0]),
                Seat::new(1, models[1].clone(), stacks[1]),
            ];
            let config = HandConfig {
                small_blind: level.small_blind,
                big_blind: level.big_blind,
                ante: level.ante,
                button,
            };

            match play_hand(
                &self.agents[..],
                seats,
                config,
                hand_number,
                seed_base.wrapping_add(hand_number),
                cancel,
            )
            .await
            {
                Ok(record) => {
                    stacks = [record.final_stacks[0], record.final_stacks[1]];
                    let was_cancelled = record.cancelled;
                    if let Some(path) = &cfg.history_path {
                        if let Err(e) = append_hand_record(path, &record) {
                            tracing::warn!(error = %e, "failed to append hand history");
                        }
                    }
                    records.push(record);
                    if was_cancelled {
                        status = MatchStatus::Cancelled;
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(hand_number, error = %e, "hand failed, aborting match");
                    status = MatchStatus::Failed;
                    break;
                }
            }
        }

        build_result(&models, &stacks, cfg.starting_stack, records, status)
    }
}

fn build_result(
    models: &[String],
    stacks: &[u32],
    starting_stack: u32,
    records: Vec<HandRecord>,
    status: MatchStatus,
) -> MatchResult {
    let entries: Vec<MatchEntry> = models
        .iter()
        .zip(stacks)
        .map(|(model, &stack)| MatchEntry {
            model: model.clone(),
            final_stack: stack,
            profit: stack as i64 - starting_stack as i64,
            finishing_position: 1 + stacks.iter().filter(|&&other| other > stack).count(),
        })
        .collect();

    let top = *stacks.iter().max().unwrap_or(&0);
    let winner = if stacks.iter().filter(|&&s| s == top).count() == 1 {
        models
            .iter()
            .zip(stacks)
            .find(|&(_, &s)| s == top)
            .map(|(m, _)| m.clone())
    } else {
        None
    };

    MatchResult {
        status,
        entries,
        hands_played: records.len() as u64,
        total_tokens: records.iter().map(|r| r.total_tokens).sum(),
        total_cost: records.iter().map(|r| r.total_cost).sum(),
        parse_failures: records
            .iter()
            .flat_map(|r| &r.decisions)
            .filter(|d| !d.parsed_ok)
            .count() as u64,
        winner,
        hands: records,
    }
}
