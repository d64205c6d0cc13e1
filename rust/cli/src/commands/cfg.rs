//! Configuration display with value provenance.

use std::io::Write;

use crate::config::ConfigResolved;
use crate::error::CliError;
use crate::formatters::format_chips;

pub fn handle_config_command(
    resolved: &ConfigResolved,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = &resolved.config;
    let sources = &resolved.sources;

    writeln!(out, "Current Configuration")?;
    writeln!(
        out,
        "  {:<20} {:>14}  ({})",
        "starting_stack",
        format_chips(cfg.starting_stack),
        sources.starting_stack.as_str()
    )?;
    writeln!(
        out,
        "  {:<20} {:>14}  ({})",
        "small_blind",
        format_chips(cfg.small_blind),
        sources.small_blind.as_str()
    )?;
    writeln!(
        out,
        "  {:<20} {:>14}  ({})",
        "big_blind",
        format_chips(cfg.big_blind),
        sources.big_blind.as_str()
    )?;
    writeln!(
        out,
        "  {:<20} {:>14}  ({})",
        "llm_temperature",
        format!("{:.1}", cfg.llm_temperature),
        sources.llm_temperature.as_str()
    )?;
    writeln!(
        out,
        "  {:<20} {:>14}  ({})",
        "llm_timeout",
        format!("{}s", cfg.llm_timeout_secs),
        sources.llm_timeout_secs.as_str()
    )?;
    writeln!(out, "  {:<20} {:>14}", "llm_retries", cfg.llm_retries)?;
    writeln!(out, "  {:<20} {:>14}", "parallelism", cfg.parallelism)?;
    writeln!(
        out,
        "  {:<20} {:>14}  ({})",
        "elo_path",
        cfg.elo_path,
        sources.elo_path.as_str()
    )?;
    writeln!(out)?;
    writeln!(out, "Models ({}):", cfg.models.len())?;
    for model in &cfg.models {
        writeln!(out, "  {}", model)?;
    }
    Ok(())
}
