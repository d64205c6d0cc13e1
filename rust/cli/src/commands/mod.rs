//! Command handler implementations.

pub mod cfg;
pub mod full_table;
pub mod hand;
pub mod heads_up;
pub mod leaderboard;
pub mod models;
pub mod round_robin;

pub use cfg::handle_config_command;
pub use full_table::handle_full_table_command;
pub use hand::handle_hand_command;
pub use heads_up::handle_heads_up_command;
pub use leaderboard::handle_leaderboard_command;
pub use models::handle_models_command;
pub use round_robin::handle_round_robin_command;

use std::sync::Arc;

use arena_agents::SeatAgent;

use crate::error::CliError;

/// One runtime per command invocation; commands are synchronous from the
/// shell's point of view.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Io)
}

/// Build one agent per model spec. Without a wired chat provider these are
/// the offline baseline agents named after their specs.
pub(crate) fn agents_for(models: &[String]) -> Vec<Arc<dyn SeatAgent>> {
    models.iter().map(|m| arena_agents::create_agent(m)).collect()
}
