//! Error types for the CLI application.

use std::fmt;

/// Errors surfaced by command handlers, converted to exit codes in one
/// place by `run`.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes)
    Io(std::io::Error),
    /// Invalid user input or command-line arguments
    InvalidInput(String),
    /// Configuration error
    Config(String),
    /// A runnable needs at least two models
    NotEnoughModels(usize),
    /// Match or engine failure
    Match(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::NotEnoughModels(n) => {
                write!(f, "Need at least 2 models, got {}", n)
            }
            CliError::Match(msg) => write!(f, "Match error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::Match(error)
    }
}
