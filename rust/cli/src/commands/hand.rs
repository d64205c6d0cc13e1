//! Single-hand command: one hand between two models, fully logged.

use std::io::Write;

use tokio_util::sync::CancellationToken;

use arena_tournament::heads_up::{HeadsUpConfig, HeadsUpMatch};

use crate::commands::{agents_for, runtime};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_chips, format_profit, short_model};

#[allow(clippy::too_many_arguments)]
pub fn handle_hand_command(
    model1: &str,
    model2: &str,
    stack: Option<u32>,
    sb: Option<u32>,
    bb: Option<u32>,
    seed: Option<u64>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let agents = agents_for(&[model1.to_string(), model2.to_string()]);
    let match_config = HeadsUpConfig {
        num_hands: 1,
        starting_stack: stack.unwrap_or(config.starting_stack),
        small_blind: sb.unwrap_or(config.small_blind),
        big_blind: bb.unwrap_or(config.big_blind),
        seed,
        ..HeadsUpConfig::default()
    };

    writeln!(out, "Playing single hand")?;
    writeln!(out, "  {} vs {}", model1, model2)?;

    let result = runtime()?.block_on(async {
        HeadsUpMatch::new([agents[0].clone(), agents[1].clone()], match_config)
            .run(&CancellationToken::new())
            .await
    });

    let record = result
        .hands
        .first()
        .ok_or_else(|| CliError::Match("no hand was played".into()))?;

    writeln!(out)?;
    writeln!(out, "Board: {}", format_board(&record.board))?;
    writeln!(out, "Pot: {}", format_chips(record.pot))?;
    writeln!(
        out,
        "Showdown: {}",
        if record.reached_showdown { "yes" } else { "no" }
    )?;
    writeln!(out, "Decisions:")?;
    for (i, d) in record.decisions.iter().enumerate() {
        let amount = d
            .action
            .amount
            .map(|a| format!(" {}", format_chips(a)))
            .unwrap_or_default();
        writeln!(
            out,
            "  {}. [{}] {}: {}{}{}",
            i + 1,
            d.street.as_str(),
            short_model(&d.model),
            d.action.kind.as_str(),
            amount,
            if d.default_used { " (default)" } else { "" },
        )?;
    }
    writeln!(out)?;
    for entry in &result.entries {
        writeln!(
            out,
            "  {}: {} ({})",
            short_model(&entry.model),
            format_chips(entry.final_stack),
            format_profit(entry.profit)
        )?;
    }
    Ok(())
}
