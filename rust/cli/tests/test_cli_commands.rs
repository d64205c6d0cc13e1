use serial_test::serial;

use arena_cli::exit_code;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = arena_cli::run(args.to_vec(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn models_lists_defaults() {
    let (code, out, _) = run(&["arena", "models"]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("openai/gpt-4o"));
}

#[test]
#[serial]
fn config_shows_provenance() {
    let (code, out, _) = run(&["arena", "config"]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("Current Configuration"));
    assert!(out.contains("elo_path"));
}

#[test]
#[serial]
fn leaderboard_with_no_data_hints() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(
        "ARENA_ELO_PATH",
        dir.path().join("elo.json").to_string_lossy().into_owned(),
    );
    let (code, out, _) = run(&["arena", "leaderboard"]);
    std::env::remove_var("ARENA_ELO_PATH");
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("No ELO data yet"));
}

#[test]
#[serial]
fn round_robin_needs_two_models() {
    let (code, _, err) = run(&["arena", "round-robin", "-m", "model/only", "--hands", "1"]);
    assert_eq!(code, exit_code::NOT_ENOUGH_MODELS);
    assert!(err.contains("at least 2 models"));
}

#[test]
#[serial]
fn single_hand_runs_offline() {
    let (code, out, _) = run(&[
        "arena", "hand", "--model1", "model/a", "--model2", "model/b", "--stack", "1000",
        "--sb", "5", "--bb", "10", "--seed", "42",
    ]);
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("Decisions:"));
}

#[test]
#[serial]
fn heads_up_match_completes() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(
        "ARENA_ELO_PATH",
        dir.path().join("elo.json").to_string_lossy().into_owned(),
    );
    let (code, out, _) = run(&[
        "arena", "heads-up", "--model1", "model/a", "--model2", "model/b", "--hands", "3",
        "--stack", "1000", "--sb", "5", "--bb", "10", "--seed", "42",
    ]);
    std::env::remove_var("ARENA_ELO_PATH");
    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("Match Complete"));
}

#[test]
#[serial]
fn usage_errors_exit_two() {
    let (code, _, err) = run(&["arena", "definitely-not-a-command"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("Usage: arena"));
}
