mod helpers;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use arena_agents::SeatAgent;
use arena_tournament::heads_up::{HeadsUpConfig, HeadsUpMatch};
use arena_tournament::MatchStatus;
use helpers::{CallAgent, FoldAgent};

fn folders() -> [Arc<dyn SeatAgent>; 2] {
    [
        Arc::new(FoldAgent::new("model/a")),
        Arc::new(FoldAgent::new("model/b")),
    ]
}

fn small_match(num_hands: u64) -> HeadsUpConfig {
    HeadsUpConfig {
        num_hands,
        starting_stack: 1_000,
        small_blind: 5,
        big_blind: 10,
        seed: Some(42),
        ..HeadsUpConfig::default()
    }
}

#[tokio::test]
async fn four_folded_hands_break_even_with_alternating_button() {
    // Both agents fold to any bet: each hand the big blind collects the
    // small blind, and the alternating button hands the chips back.
    let result = HeadsUpMatch::new(folders(), small_match(4))
        .run(&CancellationToken::new())
        .await;
    assert_eq!(result.status, MatchStatus::Completed);
    assert_eq!(result.hands_played, 4);
    let stacks: Vec<u32> = result.entries.iter().map(|e| e.final_stack).collect();
    assert_eq!(stacks, vec![1_000, 1_000]);
    assert_eq!(result.winner, None, "even stacks tie the match");
    assert!(result.entries.iter().all(|e| e.profit == 0));
    assert!(result.entries.iter().all(|e| e.finishing_position == 1));
}

#[tokio::test]
async fn odd_hand_count_gives_the_last_big_blind_the_lead() {
    let result = HeadsUpMatch::new(folders(), small_match(3))
        .run(&CancellationToken::new())
        .await;
    // Hands 1 and 2 cancel out; hand 3 has seat 0 on the button folding
    // the small blind to seat 1.
    assert_eq!(result.winner, Some("model/b".to_string()));
    let stacks: Vec<u32> = result.entries.iter().map(|e| e.final_stack).collect();
    assert_eq!(stacks, vec![995, 1_005]);
    assert_eq!(result.entries[1].finishing_position, 1);
    assert_eq!(result.entries[0].finishing_position, 2);
}

#[tokio::test]
async fn chips_are_conserved_across_every_hand() {
    let agents: [Arc<dyn SeatAgent>; 2] = [
        Arc::new(CallAgent::new("model/a")),
        Arc::new(CallAgent::new("model/b")),
    ];
    let result = HeadsUpMatch::new(agents, small_match(20))
        .run(&CancellationToken::new())
        .await;
    assert_eq!(result.status, MatchStatus::Completed);
    for record in &result.hands {
        assert_eq!(
            record.final_stacks.iter().sum::<u32>(),
            2_000,
            "hand {} leaked chips",
            record.hand_number
        );
    }
}

#[tokio::test]
async fn same_seed_replays_the_same_match() {
    let agents: [Arc<dyn SeatAgent>; 2] = [
        Arc::new(CallAgent::new("model/a")),
        Arc::new(CallAgent::new("model/b")),
    ];
    let first = HeadsUpMatch::new(agents, small_match(10))
        .run(&CancellationToken::new())
        .await;
    let agents: [Arc<dyn SeatAgent>; 2] = [
        Arc::new(CallAgent::new("model/a")),
        Arc::new(CallAgent::new("model/b")),
    ];
    let second = HeadsUpMatch::new(agents, small_match(10))
        .run(&CancellationToken::new())
        .await;
    let stacks = |r: &arena_tournament::MatchResult| {
        r.entries.iter().map(|e| e.final_stack).collect::<Vec<_>>()
    };
    assert_eq!(stacks(&first), stacks(&second));
    assert_eq!(first.hands_played, second.hands_played);
}

#[tokio::test]
async fn decision_logs_cover_the_hand_in_action_order() {
    let result = HeadsUpMatch::new(folders(), small_match(1))
        .run(&CancellationToken::new())
        .await;
    let hand = &result.hands[0];
    // One decision: the small blind folds immediately
    assert_eq!(hand.decisions.len(), 1);
    assert_eq!(hand.decisions[0].seat, 0);
    assert!(!hand.decisions[0].substituted);
    assert!(hand.decisions[0].parsed_ok);
}

#[tokio::test]
async fn cancellation_folds_out_and_marks_the_match() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = HeadsUpMatch::new(folders(), small_match(50))
        .run(&cancel)
        .await;
    assert_eq!(result.status, MatchStatus::Cancelled);
    assert_eq!(result.hands_played, 0);
}

#[tokio::test]
async fn busted_player_ends_the_match_early() {
    // Tiny stacks and escalating blinds force an all-in quickly with
    // call-bots; the match must stop as soon as one stack hits zero.
    let agents: [Arc<dyn SeatAgent>; 2] = [
        Arc::new(CallAgent::new("model/a")),
        Arc::new(CallAgent::new("model/b")),
    ];
    let config = HeadsUpConfig {
        num_hands: 10_000,
        starting_stack: 40,
        small_blind: 5,
        big_blind: 10,
        escalate: true,
        hands_per_level: 5,
        blind_multiplier: 2.0,
        seed: Some(7),
        ..HeadsUpConfig::default()
    };
    let result = HeadsUpMatch::new(agents, config).run(&CancellationToken::new()).await;
    assert_eq!(result.status, MatchStatus::Completed);
    assert!(result.hands_played < 10_000);
    let stacks: Vec<u32> = result.entries.iter().map(|e| e.final_stack).collect();
    assert_eq!(stacks.iter().sum::<u32>(), 80);
    assert!(stacks.contains(&0), "someone must bust");
    assert!(result.winner.is_some());
}
