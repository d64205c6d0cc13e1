//! Freeze-out tournament command.

use std::io::Write;

use tokio_util::sync::CancellationToken;

use arena_tournament::full_table::{run_freeze_out, FreezeOutConfig, MAX_PLAYERS};

use crate::commands::{agents_for, runtime};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_chips, short_model};

pub struct FullTableArgs {
    pub models: Vec<String>,
    pub stack: Option<u32>,
    pub sb: Option<u32>,
    pub bb: Option<u32>,
    pub level_hands: Option<u32>,
    pub max_hands: Option<u64>,
    pub seed: Option<u64>,
}

pub fn handle_full_table_command(
    args: FullTableArgs,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut models = if args.models.is_empty() {
        config.models.clone()
    } else {
        args.models.clone()
    };
    if models.len() > MAX_PLAYERS {
        crate::ui::display_warning(
            err,
            &format!("taking the first {MAX_PLAYERS} of {} models", models.len()),
        )?;
        models.truncate(MAX_PLAYERS);
    }
    if models.len() < 2 {
        return Err(CliError::NotEnoughModels(models.len()));
    }

    let agents = agents_for(&models);
    let table_config = FreezeOutConfig {
        starting_stack: args.stack.unwrap_or(config.starting_stack),
        small_blind: args.sb.unwrap_or(config.small_blind),
        big_blind: args.bb.unwrap_or(config.big_blind),
        hands_per_level: args.level_hands.unwrap_or(20),
        max_hands: args.max_hands.unwrap_or(1_000),
        seed: args.seed,
        ..FreezeOutConfig::default()
    };

    writeln!(out, "Full Table Tournament")?;
    writeln!(out, "  Players: {}", models.len())?;
    writeln!(
        out,
        "  Starting stack: {}",
        format_chips(table_config.starting_stack)
    )?;
    writeln!(
        out,
        "  Initial blinds: {}/{}",
        format_chips(table_config.small_blind),
        format_chips(table_config.big_blind)
    )?;

    let result = runtime()?.block_on(async {
        run_freeze_out(&agents, table_config, &CancellationToken::new()).await
    });

    writeln!(out)?;
    writeln!(out, "Final Standings ({:?})", result.status)?;
    for standing in &result.standings {
        let status = match standing.eliminated_at {
            Some(hand) => format!("eliminated hand {hand}"),
            None if standing.position == 1 => "winner".to_string(),
            None => "survived".to_string(),
        };
        writeln!(
            out,
            "  {:>2}. {:<28} {:>14}  {}",
            standing.position,
            short_model(&standing.model),
            format_chips(standing.final_stack),
            status
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Hands played: {}", result.hands_played)?;
    writeln!(out, "Total tokens: {}", result.total_tokens)?;
    writeln!(out, "Total cost: ${:.2}", result.total_cost)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_two_models() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let args = FullTableArgs {
            models: vec!["model/solo".into()],
            stack: None,
            sb: None,
            bb: None,
            level_hands: None,
            max_hands: None,
            seed: None,
        };
        let result =
            handle_full_table_command(args, &Config::default(), &mut out, &mut err);
        assert!(matches!(result, Err(CliError::NotEnoughModels(1))));
    }

    #[test]
    fn runs_a_small_tournament() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let args = FullTableArgs {
            models: vec!["model/a".into(), "model/b".into(), "model/c".into()],
            stack: Some(200),
            sb: Some(5),
            bb: Some(10),
            level_hands: Some(5),
            max_hands: Some(200),
            seed: Some(42),
        };
        handle_full_table_command(args, &Config::default(), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Final Standings"));
        assert!(output.contains("Hands played:"));
    }
}
