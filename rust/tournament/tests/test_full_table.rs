mod helpers;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use arena_agents::SeatAgent;
use arena_tournament::full_table::{run_freeze_out, FreezeOutConfig, FreezeOutResult};
use arena_tournament::MatchStatus;
use helpers::{CallAgent, FoldAgent};

fn three_players() -> Vec<Arc<dyn SeatAgent>> {
    // Seat 2 surrenders every decision; the others play showdown poker
    vec![
        Arc::new(CallAgent::new("model/alpha")),
        Arc::new(CallAgent::new("model/beta")),
        Arc::new(FoldAgent::new("model/quitter")),
    ]
}

fn small_table(seed: u64) -> FreezeOutConfig {
    FreezeOutConfig {
        starting_stack: 100,
        small_blind: 5,
        big_blind: 10,
        hands_per_level: 20,
        blind_multiplier: 1.5,
        max_hands: 1_000,
        seed: Some(seed),
        ..FreezeOutConfig::default()
    }
}

fn positions(result: &FreezeOutResult) -> Vec<usize> {
    let mut by_seat: Vec<(usize, usize)> = result
        .standings
        .iter()
        .map(|s| (s.seat, s.position))
        .collect();
    by_seat.sort_by_key(|&(seat, _)| seat);
    by_seat.into_iter().map(|(_, p)| p).collect()
}

#[tokio::test]
async fn freeze_out_terminates_with_complete_standings() {
    let result = run_freeze_out(&three_players(), small_table(42), &CancellationToken::new()).await;
    assert_eq!(result.status, MatchStatus::Completed);
    assert!(result.hands_played >= 1);

    // Standings cover every seat with positions 1..=3
    assert_eq!(result.standings.len(), 3);
    let mut ranks: Vec<usize> = result.standings.iter().map(|s| s.position).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);

    // Chips conserved across the whole tournament
    let total: u32 = result.standings.iter().map(|s| s.final_stack).sum();
    assert_eq!(total, 300);

    // Eliminated players have empty stacks and a bust-out hand
    for s in &result.standings {
        if s.eliminated_at.is_some() {
            assert_eq!(s.final_stack, 0);
        }
    }

    // The champion holds chips
    let champion = result.standings.iter().find(|s| s.position == 1).unwrap();
    assert!(champion.final_stack > 0);
    assert!(champion.eliminated_at.is_none());
}

#[tokio::test]
async fn freeze_out_is_deterministic_for_a_seed() {
    let first = run_freeze_out(&three_players(), small_table(7), &CancellationToken::new()).await;
    let second = run_freeze_out(&three_players(), small_table(7), &CancellationToken::new()).await;
    assert_eq!(positions(&first), positions(&second));
    assert_eq!(first.hands_played, second.hands_played);
    let stacks = |r: &FreezeOutResult| {
        let mut v: Vec<(usize, u32)> = r.standings.iter().map(|s| (s.seat, s.final_stack)).collect();
        v.sort_unstable();
        v
    };
    assert_eq!(stacks(&first), stacks(&second));
}

#[tokio::test]
async fn max_hands_ceiling_ranks_survivors_by_stack() {
    // All three fold every hand: blinds rotate chips around forever, so the
    // ceiling kicks in and survivors rank deterministically.
    let agents: Vec<Arc<dyn SeatAgent>> = vec![
        Arc::new(FoldAgent::new("model/a")),
        Arc::new(FoldAgent::new("model/b")),
        Arc::new(FoldAgent::new("model/c")),
    ];
    let config = FreezeOutConfig {
        max_hands: 9,
        hands_per_level: 1_000,
        ..small_table(3)
    };
    let result = run_freeze_out(&agents, config, &CancellationToken::new()).await;
    assert_eq!(result.hands_played, 9);
    assert_eq!(result.standings.len(), 3);
    let mut ranks: Vec<usize> = result.standings.iter().map(|s| s.position).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);
    // Nine folded hands rotate the blinds around evenly; with equal stacks
    // the seat index breaks the tie
    assert_eq!(positions(&result), vec![1, 2, 3]);
    let total: u32 = result.standings.iter().map(|s| s.final_stack).sum();
    assert_eq!(total, 300);
}

#[tokio::test]
async fn cancellation_stops_the_tournament() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = run_freeze_out(&three_players(), small_table(1), &cancel).await;
    assert_eq!(result.status, MatchStatus::Cancelled);
}

#[tokio::test]
async fn heads_up_freeze_out_crowns_a_champion() {
    let agents: Vec<Arc<dyn SeatAgent>> = vec![
        Arc::new(CallAgent::new("model/a")),
        Arc::new(FoldAgent::new("model/b")),
    ];
    let result = run_freeze_out(&agents, small_table(5), &CancellationToken::new()).await;
    assert_eq!(result.status, MatchStatus::Completed);
    let champion = result.standings.iter().find(|s| s.position == 1).unwrap();
    assert_eq!(champion.final_stack, 200);
}
