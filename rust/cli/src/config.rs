//! Harness configuration: defaults, optional TOML file, env overrides.
//!
//! Resolution order is defaults, then the file named by `ARENA_CONFIG`,
//! then `ARENA_*` environment variables. Each field remembers where its
//! value came from so the `config` subcommand can show provenance.

use serde::{Deserialize, Serialize};
use std::fs;

/// Built-in model list used when no models are configured.
pub const DEFAULT_MODELS: &[&str] = &[
    "openai/gpt-4o",
    "anthropic/claude-sonnet-4-20250514",
    "gemini/gemini-1.5-pro",
    "groq/llama-3.1-70b-versatile",
    "mistral/mistral-large-latest",
    "deepseek/deepseek-chat",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
    pub llm_retries: u32,
    pub parallelism: usize,
    pub elo_path: String,
    pub models: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: 1_500_000,
            small_blind: 5_000,
            big_blind: 10_000,
            llm_temperature: 0.7,
            llm_timeout_secs: 30,
            llm_retries: 3,
            parallelism: 1,
            elo_path: "data/elo_ratings.json".into(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub llm_temperature: ValueSource,
    pub llm_timeout_secs: ValueSource,
    pub elo_path: ValueSource,
    pub models: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            llm_temperature: ValueSource::Default,
            llm_timeout_secs: ValueSource::Default,
            elo_path: ValueSource::Default,
            models: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config io error: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    llm_temperature: Option<f32>,
    #[serde(default)]
    llm_timeout_secs: Option<u64>,
    #[serde(default)]
    llm_retries: Option<u32>,
    #[serde(default)]
    parallelism: Option<usize>,
    #[serde(default)]
    elo_path: Option<String>,
    #[serde(default)]
    models: Option<Vec<String>>,
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("ARENA_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.llm_temperature {
            cfg.llm_temperature = v;
            sources.llm_temperature = ValueSource::File;
        }
        if let Some(v) = f.llm_timeout_secs {
            cfg.llm_timeout_secs = v;
            sources.llm_timeout_secs = ValueSource::File;
        }
        if let Some(v) = f.llm_retries {
            cfg.llm_retries = v;
        }
        if let Some(v) = f.parallelism {
            cfg.parallelism = v;
        }
        if let Some(v) = f.elo_path {
            cfg.elo_path = v;
            sources.elo_path = ValueSource::File;
        }
        if let Some(v) = f.models {
            cfg.models = v;
            sources.models = ValueSource::File;
        }
    }

    if let Ok(v) = std::env::var("ARENA_STARTING_STACK") {
        if !v.is_empty() {
            cfg.starting_stack = v
                .parse()
                .map_err(|_| ConfigError::Invalid("invalid starting_stack".into()))?;
            sources.starting_stack = ValueSource::Env;
        }
    }
    if let Ok(v) = std::env::var("ARENA_SMALL_BLIND") {
        if !v.is_empty() {
            cfg.small_blind = v
                .parse()
                .map_err(|_| ConfigError::Invalid("invalid small_blind".into()))?;
            sources.small_blind = ValueSource::Env;
        }
    }
    if let Ok(v) = std::env::var("ARENA_BIG_BLIND") {
        if !v.is_empty() {
            cfg.big_blind = v
                .parse()
                .map_err(|_| ConfigError::Invalid("invalid big_blind".into()))?;
            sources.big_blind = ValueSource::Env;
        }
    }
    if let Ok(v) = std::env::var("ARENA_LLM_TIMEOUT") {
        if !v.is_empty() {
            cfg.llm_timeout_secs = v
                .parse()
                .map_err(|_| ConfigError::Invalid("invalid llm_timeout".into()))?;
            sources.llm_timeout_secs = ValueSource::Env;
        }
    }
    if let Ok(v) = std::env::var("ARENA_ELO_PATH") {
        if !v.is_empty() {
            cfg.elo_path = v;
            sources.elo_path = ValueSource::Env;
        }
    }
    if let Ok(v) = std::env::var("ARENA_MODELS") {
        if !v.is_empty() {
            cfg.models = v.split(',').map(|m| m.trim().to_string()).collect();
            sources.models = ValueSource::Env;
        }
    }

    validate(&cfg)?;
    Ok(ConfigResolved { config: cfg, sources })
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid("starting_stack must be > 0".into()));
    }
    if cfg.big_blind == 0 || cfg.small_blind == 0 {
        return Err(ConfigError::Invalid("blinds must be > 0".into()));
    }
    if cfg.small_blind >= cfg.big_blind {
        return Err(ConfigError::Invalid(
            "small_blind must be below big_blind".into(),
        ));
    }
    if cfg.big_blind >= cfg.starting_stack {
        return Err(ConfigError::Invalid(
            "starting_stack must cover the big blind".into(),
        ));
    }
    Ok(())
}

impl ValueSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueSource::Default => "default",
            ValueSource::File => "file",
            ValueSource::Env => "env",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "ARENA_CONFIG",
            "ARENA_STARTING_STACK",
            "ARENA_SMALL_BLIND",
            "ARENA_BIG_BLIND",
            "ARENA_LLM_TIMEOUT",
            "ARENA_ELO_PATH",
            "ARENA_MODELS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_without_file_or_env() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert!(matches!(
            resolved.sources.starting_stack,
            ValueSource::Default
        ));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        std::fs::write(&path, "starting_stack = 500000\nbig_blind = 20000\n").unwrap();
        std::env::set_var("ARENA_CONFIG", &path);
        std::env::set_var("ARENA_STARTING_STACK", "750000");

        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config.starting_stack, 750_000);
        assert!(matches!(resolved.sources.starting_stack, ValueSource::Env));
        assert_eq!(resolved.config.big_blind, 20_000);
        assert!(matches!(resolved.sources.big_blind, ValueSource::File));
        clear_env();
    }

    #[test]
    #[serial]
    fn models_come_from_csv_env() {
        clear_env();
        std::env::set_var("ARENA_MODELS", "a/one, b/two");
        let cfg = load().unwrap();
        assert_eq!(cfg.models, vec!["a/one", "b/two"]);
        clear_env();
    }

    #[test]
    #[serial]
    fn nonsense_values_are_rejected() {
        clear_env();
        std::env::set_var("ARENA_STARTING_STACK", "lots");
        assert!(load().is_err());
        clear_env();
        std::env::set_var("ARENA_BIG_BLIND", "0");
        assert!(load().is_err());
        clear_env();
    }
}
