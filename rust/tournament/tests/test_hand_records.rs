mod helpers;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use arena_agents::SeatAgent;
use arena_tournament::hands::{append_hand_record, HandRecord};
use arena_tournament::heads_up::{HeadsUpConfig, HeadsUpMatch};
use helpers::CallAgent;

async fn play_some_hands(history: std::path::PathBuf) -> Vec<HandRecord> {
    let agents: [Arc<dyn SeatAgent>; 2] = [
        Arc::new(CallAgent::new("model/a")),
        Arc::new(CallAgent::new("model/b")),
    ];
    let config = HeadsUpConfig {
        num_hands: 3,
        starting_stack: 1_000,
        small_blind: 5,
        big_blind: 10,
        seed: Some(42),
        history_path: Some(history),
        ..HeadsUpConfig::default()
    };
    HeadsUpMatch::new(agents, config)
        .run(&CancellationToken::new())
        .await
        .hands
}

#[tokio::test]
async fn hand_records_round_trip_through_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.jsonl");
    let played = play_some_hands(path.clone()).await;

    let contents = std::fs::read_to_string(&path).unwrap();
    let restored: Vec<HandRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(restored.len(), played.len());
    for (a, b) in played.iter().zip(&restored) {
        assert_eq!(a.hand_number, b.hand_number);
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.board, b.board);
        assert_eq!(a.pot, b.pot);
        assert_eq!(a.final_stacks, b.final_stacks);
        assert_eq!(a.profits, b.profits);
        assert_eq!(a.reached_showdown, b.reached_showdown);
        assert_eq!(a.decisions.len(), b.decisions.len());
        for (d, e) in a.decisions.iter().zip(&b.decisions) {
            assert_eq!(d.seat, e.seat);
            assert_eq!(d.action, e.action);
            assert_eq!(d.street, e.street);
        }
    }
}

#[tokio::test]
async fn append_extends_an_existing_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.jsonl");
    let first = play_some_hands(path.clone()).await;
    append_hand_record(&path, &first[0]).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), first.len() + 1);
}
