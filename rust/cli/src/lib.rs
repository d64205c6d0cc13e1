//! # Arena CLI Library
//!
//! Command-line interface for the LLM poker evaluation harness.
//!
//! ## Module Organization
//!
//! - **`cli`**: CLI structures (ArenaCli, Commands enum)
//! - **`commands`**: Command handler implementations
//! - **`formatters`**: Chip/card/table formatting
//! - **`config`**, **`error`**, **`exit_code`**, **`ui`**: Support modules
//!
//! ## Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["arena", "models"];
//! let code = arena_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Commands
//!
//! `hand`, `heads-up`, `round-robin`, `full-table`, `leaderboard`, `models`,
//! `config`. Exit code 0 on normal completion, 1 when fewer than two models
//! are available, 2 on usage or runtime errors.

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod ui;

use cli::{ArenaCli, Commands};
use commands::{
    handle_config_command, handle_full_table_command, handle_hand_command,
    handle_heads_up_command, handle_leaderboard_command, handle_models_command,
    handle_round_robin_command,
};
use commands::full_table::FullTableArgs;
use commands::heads_up::HeadsUpArgs;
use commands::round_robin::RoundRobinArgs;

pub use error::CliError;

/// Parse arguments and dispatch to the subcommand handler, converting the
/// result to a process exit code.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
    match ArenaCli::try_parse_from(&argv) {
        Err(e) => handle_parse_error(e, out, err),
        Ok(cli) => execute_command(cli.cmd, out, err),
    }
}

fn handle_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e);
            exit_code::SUCCESS
        }
        _ => {
            const COMMANDS: &[&str] = &[
                "hand",
                "heads-up",
                "round-robin",
                "full-table",
                "leaderboard",
                "models",
                "config",
            ];
            let _ = writeln!(err, "{}", e);
            let _ = writeln!(err, "Usage: arena <command> [options]\n");
            let _ = writeln!(err, "Commands:");
            for c in COMMANDS {
                let _ = writeln!(err, "  {}", c);
            }
            let _ = writeln!(err, "\nFor full help, run: arena --help");
            exit_code::ERROR
        }
    }
}

fn execute_command(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    let resolved = match config::load_with_sources() {
        Ok(resolved) => resolved,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            return exit_code::ERROR;
        }
    };
    let cfg = resolved.config.clone();

    let result = match cmd {
        Commands::Hand {
            model1,
            model2,
            stack,
            sb,
            bb,
            seed,
        } => handle_hand_command(&model1, &model2, stack, sb, bb, seed, &cfg, out),
        Commands::HeadsUp {
            model1,
            model2,
            hands,
            stack,
            sb,
            bb,
            escalate,
            seed,
            history,
            no_elo,
        } => handle_heads_up_command(
            HeadsUpArgs {
                model1,
                model2,
                hands,
                stack,
                sb,
                bb,
                escalate,
                seed,
                history,
                no_elo,
            },
            &cfg,
            out,
        ),
        Commands::RoundRobin {
            models,
            hands,
            stack,
            sb,
            bb,
            parallelism,
            seed,
            no_elo,
        } => handle_round_robin_command(
            RoundRobinArgs {
                models,
                hands,
                stack,
                sb,
                bb,
                parallelism,
                seed,
                no_elo,
            },
            &cfg,
            out,
        ),
        Commands::FullTable {
            models,
            stack,
            sb,
            bb,
            level_hands,
            max_hands,
            seed,
        } => handle_full_table_command(
            FullTableArgs {
                models,
                stack,
                sb,
                bb,
                level_hands,
                max_hands,
                seed,
            },
            &cfg,
            out,
            err,
        ),
        Commands::Leaderboard => handle_leaderboard_command(&cfg, out),
        Commands::Models => handle_models_command(&cfg, out),
        Commands::Config => handle_config_command(&resolved, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::NotEnoughModels(n)) => {
            let _ = ui::write_error(err, &format!("need at least 2 models, got {}", n));
            exit_code::NOT_ENOUGH_MODELS
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
