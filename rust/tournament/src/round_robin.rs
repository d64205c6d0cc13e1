//! Round-robin league: every unordered pair plays an independent heads-up
//! match.
//!
//! Matches share no state (fresh stacks, own seed space), so they may run in
//! parallel under a configurable cap to respect provider rate limits.
//! Rating updates commit in match *completion* order through the single
//! writer inside [`EloService`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use arena_agents::SeatAgent;

use crate::elo::EloService;
use crate::heads_up::{HeadsUpConfig, HeadsUpMatch, MatchResult, MatchStatus};

#[derive(Debug, Clone)]
pub struct RoundRobinConfig {
    pub hands_per_match: u64,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Max matches in flight at once
    pub parallelism: usize,
    pub seed: Option<u64>,
}

impl Default for RoundRobinConfig {
    fn default() -> Self {
        Self {
            hands_per_match: 100,
            starting_stack: 1_500_000,
            small_blind: 5_000,
            big_blind: 10_000,
            parallelism: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub model: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub profit: i64,
    pub hands_played: u64,
    pub tokens: u64,
    pub cost: f64,
}

#[derive(Debug, Serialize)]
pub struct RoundRobinResult {
    /// Per-pair results in pairing order
    pub matches: Vec<MatchResult>,
    /// Aggregated standings, best net profit first
    pub standings: Vec<Standing>,
    pub total_hands: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
}

/// Run all `C(K,2)` pairings. When a rating service is supplied, each
/// completed match commits to it as it finishes.
pub async fn run_round_robin(
    agents: &[Arc<dyn SeatAgent>],
    config: RoundRobinConfig,
    elo: Option<Arc<EloService>>,
    cancel: &CancellationToken,
) -> RoundRobinResult {
    let pairings: Vec<(usize, usize)> = (0..agents.len())
        .flat_map(|i| ((i + 1)..agents.len()).map(move |j| (i, j)))
        .collect();
    let seed_base = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        models = agents.len(),
        matches = pairings.len(),
        parallelism = config.parallelism,
        "round robin starting"
    );

    let limiter = Arc::new(Semaphore::new(config.parallelism.max(1)));
    let mut tasks: JoinSet<(usize, MatchResult)> = JoinSet::new();

    for (match_index, &(i, j)) in pairings.iter().enumerate() {
        let limiter = Arc::clone(&limiter);
        let pair = [Arc::clone(&agents[i]), Arc::clone(&agents[j])];
        let elo = elo.clone();
        let cancel = cancel.clone();
        let match_config = HeadsUpConfig {
            num_hands: config.hands_per_match,
            starting_stack: config.starting_stack,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            // Disjoint seed space per pairing
            seed: Some(seed_base.wrapping_add(match_index as u64 * 1_000_003)),
            ..HeadsUpConfig::default()
        };

        tasks.spawn(async move {
            let _permit = limiter.acquire_owned().await.expect("semaphore open");
            let result = HeadsUpMatch::new(pair, match_config).run(&cancel).await;
            // Commit in completion order, under the service's writer lock
            if let Some(elo) = &elo {
                result.commit_ratings(elo);
            }
            (match_index, result)
        });
    }

    let mut slots: Vec<Option<MatchResult>> = (0..pairings.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::error!(error = %e, "match task panicked"),
        }
    }
    let matches: Vec<MatchResult> = slots.into_iter().flatten().collect();

    build_result(matches)
}

fn build_result(matches: Vec<MatchResult>) -> RoundRobinResult {
    let mut by_model: HashMap<String, Standing> = HashMap::new();
    for result in &matches {
        for entry in &result.entries {
            let standing = by_model
                .entry(entry.model.clone())
                .or_insert_with(|| Standing {
                    model: entry.model.clone(),
                    wins: 0,
                    losses: 0,
                    ties: 0,
                    profit: 0,
                    hands_played: 0,
                    tokens: 0,
                    cost: 0.0,
                });
            standing.profit += entry.profit;
            standing.hands_played += result.hands_played;
            standing.tokens += result.total_tokens / result.entries.len() as u64;
            standing.cost += result.total_cost / result.entries.len() as f64;
            if result.status == MatchStatus::Completed {
                match &result.winner {
                    Some(winner) if *winner == entry.model => standing.wins += 1,
                    Some(_) => standing.losses += 1,
                    None => standing.ties += 1,
                }
            }
        }
    }
    let mut standings: Vec<Standing> = by_model.into_values().collect();
    standings.sort_by(|a, b| b.profit.cmp(&a.profit).then(a.model.cmp(&b.model)));

    RoundRobinResult {
        total_hands: matches.iter().map(|m| m.hands_played).sum(),
        total_tokens: matches.iter().map(|m| m.total_tokens).sum(),
        total_cost: matches.iter().map(|m| m.total_cost).sum(),
        matches,
        standings,
    }
}
