//! ELO leaderboard display.

use std::io::Write;

use arena_tournament::elo::EloService;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::short_model;

pub fn handle_leaderboard_command(config: &Config, out: &mut dyn Write) -> Result<(), CliError> {
    let elo = EloService::open(&config.elo_path);
    let board = elo.leaderboard();

    if board.is_empty() {
        writeln!(out, "No ELO data yet. Run some matches first!")?;
        return Ok(());
    }

    writeln!(out, "ELO Leaderboard")?;
    writeln!(
        out,
        "  {:<4} {:<28} {:>6} {:>10} {:>7}",
        "Rank", "Model", "ELO", "W-L-D", "Games"
    )?;
    for (rank, rating) in board.iter().enumerate() {
        writeln!(
            out,
            "  {:<4} {:<28} {:>6} {:>10} {:>7}",
            rank + 1,
            short_model(&rating.model),
            rating.rating,
            format!("{}-{}-{}", rating.wins, rating.losses, rating.draws),
            rating.games_played
        )?;
    }
    Ok(())
}
