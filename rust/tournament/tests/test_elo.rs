use arena_tournament::elo::{EloRating, EloService, DEFAULT_RATING};

#[test]
fn first_decisive_match_between_fresh_players() {
    let elo = EloService::ephemeral();
    let (winner, loser) = elo.record_match("model/a", "model/b");
    assert_eq!(winner, 1520);
    assert_eq!(loser, 1480);
    assert_eq!(elo.rating_of("model/a").wins, 1);
    assert_eq!(elo.rating_of("model/b").losses, 1);
}

#[test]
fn unknown_models_read_as_fresh() {
    let elo = EloService::ephemeral();
    let rating = elo.rating_of("never/seen");
    assert_eq!(rating.rating, DEFAULT_RATING);
    assert_eq!(rating.games_played, 0);
}

#[test]
fn ratings_fold_update_steps_in_commit_order() {
    let elo = EloService::ephemeral();
    elo.record_match("model/a", "model/b");
    elo.record_match("model/a", "model/c");
    elo.record_match("model/b", "model/c");
    // Replaying the same sequence on a fresh service reproduces the ratings
    let replay = EloService::ephemeral();
    replay.record_match("model/a", "model/b");
    replay.record_match("model/a", "model/c");
    replay.record_match("model/b", "model/c");
    for model in ["model/a", "model/b", "model/c"] {
        assert_eq!(elo.rating_of(model), replay.rating_of(model));
    }
}

#[test]
fn win_probability_tracks_rating_gap() {
    let elo = EloService::ephemeral();
    assert!((elo.win_probability("model/a", "model/b") - 0.5).abs() < 0.01);
    elo.record_match("model/a", "model/b");
    elo.record_match("model/a", "model/b");
    assert!(elo.win_probability("model/a", "model/b") > 0.5);
}

#[test]
fn ratings_persist_across_service_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elo_ratings.json");

    {
        let elo = EloService::open(&path);
        elo.record_match("model/a", "model/b");
        elo.record_match("model/a", "model/c");
    }
    assert!(path.exists());

    let reloaded = EloService::open(&path);
    assert_eq!(reloaded.rating_of("model/a").games_played, 2);
    assert_eq!(reloaded.rating_of("model/a").wins, 2);
    assert_eq!(
        reloaded.rating_of("model/b").rating,
        EloService::open(&path).rating_of("model/b").rating
    );
}

#[test]
fn rating_file_is_a_flat_record_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elo_ratings.json");
    let elo = EloService::open(&path);
    elo.record_match("model/a", "model/b");

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<EloRating> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.games_played, 1);
    }
    // No leftover temp file from the atomic rewrite
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn corrupt_rating_files_start_fresh_instead_of_crashing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elo_ratings.json");
    std::fs::write(&path, "not json at all").unwrap();
    let elo = EloService::open(&path);
    assert_eq!(elo.rating_of("model/a").rating, DEFAULT_RATING);
}

#[test]
fn leaderboard_snapshot_is_sorted_best_first() {
    let elo = EloService::ephemeral();
    elo.record_match("top/model", "mid/model");
    elo.record_match("top/model", "low/model");
    elo.record_match("mid/model", "low/model");
    let board = elo.leaderboard();
    assert_eq!(board[0].model, "top/model");
    let ratings: Vec<i32> = board.iter().map(|r| r.rating).collect();
    let mut sorted = ratings.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ratings, sorted);
}
