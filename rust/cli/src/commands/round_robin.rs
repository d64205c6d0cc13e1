//! Round-robin league command.

use std::io::Write;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use arena_tournament::elo::EloService;
use arena_tournament::round_robin::{run_round_robin, RoundRobinConfig};

use crate::commands::{agents_for, runtime};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_chips, format_profit, short_model};

pub struct RoundRobinArgs {
    pub models: Vec<String>,
    pub hands: Option<u64>,
    pub stack: Option<u32>,
    pub sb: Option<u32>,
    pub bb: Option<u32>,
    pub parallelism: Option<usize>,
    pub seed: Option<u64>,
    pub no_elo: bool,
}

pub fn handle_round_robin_command(
    args: RoundRobinArgs,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let models = if args.models.is_empty() {
        config.models.clone()
    } else {
        args.models.clone()
    };
    if models.len() < 2 {
        return Err(CliError::NotEnoughModels(models.len()));
    }

    let agents = agents_for(&models);
    let league_config = RoundRobinConfig {
        hands_per_match: args.hands.unwrap_or(100),
        starting_stack: args.stack.unwrap_or(config.starting_stack),
        small_blind: args.sb.unwrap_or(config.small_blind),
        big_blind: args.bb.unwrap_or(config.big_blind),
        parallelism: args.parallelism.unwrap_or(config.parallelism),
        seed: args.seed,
    };
    let matches = models.len() * (models.len() - 1) / 2;

    writeln!(out, "Round Robin Tournament")?;
    writeln!(out, "  Models: {}", models.len())?;
    writeln!(out, "  Matches: {}", matches)?;
    writeln!(out, "  Hands per match: {}", league_config.hands_per_match)?;

    let elo = if args.no_elo {
        None
    } else {
        Some(Arc::new(EloService::open(&config.elo_path)))
    };
    let result = runtime()?.block_on(async {
        run_round_robin(&agents, league_config, elo, &CancellationToken::new()).await
    });

    writeln!(out)?;
    writeln!(out, "Tournament Standings")?;
    writeln!(
        out,
        "  {:<4} {:<28} {:>7} {:>14} {:>8}",
        "Rank", "Model", "W-L-T", "Profit", "Hands"
    )?;
    for (rank, s) in result.standings.iter().enumerate() {
        writeln!(
            out,
            "  {:<4} {:<28} {:>7} {:>14} {:>8}",
            rank + 1,
            short_model(&s.model),
            format!("{}-{}-{}", s.wins, s.losses, s.ties),
            format_profit(s.profit),
            s.hands_played
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Total hands: {}", format_chips(result.total_hands as i64))?;
    writeln!(out, "Total tokens: {}", result.total_tokens)?;
    writeln!(out, "Total cost: ${:.2}", result.total_cost)?;
    Ok(())
}
