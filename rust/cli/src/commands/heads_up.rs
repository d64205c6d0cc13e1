//! Heads-up match command with rating updates.

use std::io::Write;

use tokio_util::sync::CancellationToken;

use arena_tournament::elo::EloService;
use arena_tournament::heads_up::{HeadsUpConfig, HeadsUpMatch};
use arena_tournament::MatchStatus;

use crate::commands::{agents_for, runtime};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_chips, format_profit, short_model};

pub struct HeadsUpArgs {
    pub model1: String,
    pub model2: String,
    pub hands: Option<u64>,
    pub stack: Option<u32>,
    pub sb: Option<u32>,
    pub bb: Option<u32>,
    pub escalate: bool,
    pub seed: Option<u64>,
    pub history: Option<String>,
    pub no_elo: bool,
}

pub fn handle_heads_up_command(
    args: HeadsUpArgs,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let agents = agents_for(&[args.model1.clone(), args.model2.clone()]);
    let match_config = HeadsUpConfig {
        num_hands: args.hands.unwrap_or(100),
        starting_stack: args.stack.unwrap_or(config.starting_stack),
        small_blind: args.sb.unwrap_or(config.small_blind),
        big_blind: args.bb.unwrap_or(config.big_blind),
        escalate: args.escalate,
        seed: args.seed,
        history_path: args.history.as_ref().map(std::path::PathBuf::from),
        ..HeadsUpConfig::default()
    };

    writeln!(out, "Starting Heads-Up Match")?;
    writeln!(out, "  {} vs {}", args.model1, args.model2)?;
    writeln!(
        out,
        "  {} hands, {} starting stack",
        match_config.num_hands,
        format_chips(match_config.starting_stack)
    )?;

    let result = runtime()?.block_on(async {
        HeadsUpMatch::new([agents[0].clone(), agents[1].clone()], match_config)
            .run(&CancellationToken::new())
            .await
    });

    writeln!(out)?;
    writeln!(out, "Match Complete ({:?})", result.status)?;
    writeln!(out, "  Hands played: {}", result.hands_played)?;
    for entry in &result.entries {
        let verdict = match &result.winner {
            Some(w) if *w == entry.model => "WIN",
            Some(_) => "LOSS",
            None => "TIE",
        };
        writeln!(
            out,
            "  {:<28} {:>12} {:>12}  {}",
            short_model(&entry.model),
            format_chips(entry.final_stack),
            format_profit(entry.profit),
            verdict
        )?;
    }
    writeln!(out, "  Total tokens: {}", result.total_tokens)?;
    writeln!(out, "  Total cost: ${:.4}", result.total_cost)?;
    if result.parse_failures > 0 {
        writeln!(out, "  Parse failures: {}", result.parse_failures)?;
    }

    if result.status == MatchStatus::Failed {
        return Err(CliError::Match("match failed; see logs".into()));
    }

    if !args.no_elo && result.status == MatchStatus::Completed {
        let elo = EloService::open(&config.elo_path);
        result.commit_ratings(&elo);
        writeln!(out)?;
        writeln!(out, "ELO Updates")?;
        for entry in &result.entries {
            writeln!(
                out,
                "  {}: {}",
                short_model(&entry.model),
                elo.rating_of(&entry.model).rating
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(dir: &std::path::Path) -> Config {
        Config {
            starting_stack: 1_000,
            small_blind: 5,
            big_blind: 10,
            elo_path: dir.join("elo.json").to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn runs_a_match_and_reports_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let args = HeadsUpArgs {
            model1: "model/a".into(),
            model2: "model/b".into(),
            hands: Some(4),
            stack: None,
            sb: None,
            bb: None,
            escalate: false,
            seed: Some(42),
            history: None,
            no_elo: true,
        };
        handle_heads_up_command(args, &small_config(dir.path()), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Match Complete"));
        assert!(output.contains("Hands played: 4"));
    }

    #[test]
    fn elo_file_appears_after_a_decisive_match() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path());
        let mut out = Vec::new();
        let args = HeadsUpArgs {
            model1: "model/a".into(),
            model2: "model/b".into(),
            hands: Some(3),
            stack: None,
            sb: None,
            bb: None,
            escalate: false,
            seed: Some(42),
            history: None,
            no_elo: false,
        };
        handle_heads_up_command(args, &config, &mut out).unwrap();
        assert!(std::path::Path::new(&config.elo_path).exists());
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("ELO Updates"));
    }
}
