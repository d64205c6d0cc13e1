//! Configured model listing.

use std::io::Write;

use crate::config::Config;
use crate::error::CliError;

pub fn handle_models_command(config: &Config, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Configured Models")?;
    writeln!(out, "  {:<40} {}", "Model", "Provider")?;
    for model in &config.models {
        let provider = model.split('/').next().unwrap_or("unknown");
        writeln!(out, "  {:<40} {}", model, provider)?;
    }
    writeln!(out)?;
    writeln!(out, "Format: provider/model-name (e.g. openai/gpt-4o)")?;
    Ok(())
}
