//! CLI argument structures: the `arena` command and its subcommands.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "arena", about = "LLM poker evaluation harness", version)]
pub struct ArenaCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a single hand between two models (for debugging)
    Hand {
        #[arg(long = "model1", short = '1')]
        model1: String,
        #[arg(long = "model2", short = '2')]
        model2: String,
        /// Starting stack for each player
        #[arg(long, short)]
        stack: Option<u32>,
        /// Small blind amount
        #[arg(long)]
        sb: Option<u32>,
        /// Big blind amount
        #[arg(long)]
        bb: Option<u32>,
        /// RNG seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a heads-up match between two models
    HeadsUp {
        #[arg(long = "model1", short = '1')]
        model1: String,
        #[arg(long = "model2", short = '2')]
        model2: String,
        /// Number of hands to play
        #[arg(long, short = 'n')]
        hands: Option<u64>,
        #[arg(long, short)]
        stack: Option<u32>,
        #[arg(long)]
        sb: Option<u32>,
        #[arg(long)]
        bb: Option<u32>,
        /// Use the escalating blind structure
        #[arg(long)]
        escalate: bool,
        #[arg(long)]
        seed: Option<u64>,
        /// Append hand records to this JSONL file
        #[arg(long)]
        history: Option<String>,
        /// Skip the rating update for this match
        #[arg(long)]
        no_elo: bool,
    },
    /// Run a round robin league (all pairs play each other)
    RoundRobin {
        /// Models to include (repeatable; defaults to the configured list)
        #[arg(long = "model", short = 'm')]
        models: Vec<String>,
        /// Hands per match
        #[arg(long, short = 'n')]
        hands: Option<u64>,
        #[arg(long, short)]
        stack: Option<u32>,
        #[arg(long)]
        sb: Option<u32>,
        #[arg(long)]
        bb: Option<u32>,
        /// Matches to run in parallel
        #[arg(long, short)]
        parallelism: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Skip rating updates
        #[arg(long)]
        no_elo: bool,
    },
    /// Run a single-table freeze-out until one player remains
    FullTable {
        /// Models to include (repeatable, max 8; defaults to the configured list)
        #[arg(long = "model", short = 'm')]
        models: Vec<String>,
        #[arg(long, short)]
        stack: Option<u32>,
        #[arg(long)]
        sb: Option<u32>,
        #[arg(long)]
        bb: Option<u32>,
        /// Hands before the blinds increase
        #[arg(long = "level-hands")]
        level_hands: Option<u32>,
        /// Maximum hands before ranking survivors by stack
        #[arg(long = "max-hands", short = 'n')]
        max_hands: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the ELO leaderboard
    Leaderboard,
    /// List the configured default models
    Models,
    /// Show the current configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        ArenaCli::command().debug_assert();
    }

    #[test]
    fn all_seven_subcommands_parse() {
        let commands = vec![
            vec!["arena", "hand", "--model1", "a/x", "--model2", "b/y"],
            vec!["arena", "heads-up", "--model1", "a/x", "--model2", "b/y", "--hands", "10"],
            vec!["arena", "round-robin", "-m", "a/x", "-m", "b/y"],
            vec!["arena", "full-table", "-m", "a/x", "-m", "b/y", "-m", "c/z"],
            vec!["arena", "leaderboard"],
            vec!["arena", "models"],
            vec!["arena", "config"],
        ];
        for args in commands {
            assert!(
                ArenaCli::try_parse_from(&args).is_ok(),
                "failed to parse {args:?}"
            );
        }
    }

    #[test]
    fn escalate_flag_is_optional() {
        let cli = ArenaCli::try_parse_from([
            "arena", "heads-up", "--model1", "a/x", "--model2", "b/y", "--escalate",
        ])
        .unwrap();
        match cli.cmd {
            Commands::HeadsUp { escalate, .. } => assert!(escalate),
            _ => panic!("expected heads-up"),
        }
    }
}
