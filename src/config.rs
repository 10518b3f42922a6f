//! Front-end configuration.
//!
//! Precedence: built-in defaults, then the TOML file named by
//! `POT_SPLIT_CONFIG`, then individual `POT_SPLIT_*` environment variables.

use crate::pots::Boards;
use crate::session::MAX_ROWS;
use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs, io};

pub const CONFIG_ENV: &str = "POT_SPLIT_CONFIG";
pub const BOARDS_ENV: &str = "POT_SPLIT_BOARDS";
pub const BUY_IN_ENV: &str = "POT_SPLIT_BUY_IN";
pub const LOG_ENV: &str = "POT_SPLIT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub boards: Boards,
    pub max_rows: usize,
    /// Default buy-in for the payout sheet; empty disables the stepper.
    pub buy_in_unit: String,
    /// Regular players offered for quick seating.
    pub usual_suspects: Vec<String>,
    /// Where log output goes. Logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boards: Boards::One,
            max_rows: MAX_ROWS,
            buy_in_unit: String::new(),
            usual_suspects: Vec::new(),
            log_file: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    boards: Option<u8>,
    #[serde(default)]
    max_rows: Option<usize>,
    #[serde(default)]
    buy_in: Option<String>,
    #[serde(default)]
    usual_suspects: Option<Vec<String>>,
    #[serde(default)]
    log_file: Option<PathBuf>,
}

impl Config {
    /// Defaults overlaid with a TOML document.
    ///
    /// ```
    /// use pot_split::config::Config;
    /// use pot_split::pots::Boards;
    ///
    /// let cfg = Config::from_toml_str("boards = 2\nusual_suspects = [\"Ann\"]").unwrap();
    /// assert_eq!(cfg.boards, Boards::Two);
    /// assert_eq!(cfg.usual_suspects, vec!["Ann".to_string()]);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(s)?;
        let mut cfg = Config::default();
        cfg.merge(file)?;
        validate(&cfg)?;
        Ok(cfg)
    }

    fn merge(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(v) = file.boards {
            self.boards = boards_from_count(u64::from(v))?;
        }
        if let Some(v) = file.max_rows {
            self.max_rows = v;
        }
        if let Some(v) = file.buy_in {
            self.buy_in_unit = v;
        }
        if let Some(v) = file.usual_suspects {
            self.usual_suspects = v;
        }
        if let Some(v) = file.log_file {
            self.log_file = Some(v);
        }
        Ok(())
    }

    /// Apply `POT_SPLIT_*` overrides read through `var`.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(boards) = var(BOARDS_ENV).filter(|s| !s.is_empty()) {
            let n = boards
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid(format!("{BOARDS_ENV} must be 1 or 2")))?;
            self.boards = boards_from_count(n)?;
        }
        if let Some(buy_in) = var(BUY_IN_ENV) {
            self.buy_in_unit = buy_in;
        }
        if let Some(path) = var(LOG_ENV).filter(|s| !s.is_empty()) {
            self.log_file = Some(PathBuf::from(path));
        }
        Ok(())
    }
}

/// Load configuration from the environment.
pub fn load() -> Result<Config, ConfigError> {
    load_with(|key| env::var(key).ok())
}

fn load_with(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();
    if let Some(path) = var(CONFIG_ENV).filter(|s| !s.is_empty()) {
        let s = fs::read_to_string(path)?;
        cfg.merge(toml::from_str(&s)?)?;
    }
    cfg.apply_env(var)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn boards_from_count(n: u64) -> Result<Boards, ConfigError> {
    match n {
        1 => Ok(Boards::One),
        2 => Ok(Boards::Two),
        other => Err(ConfigError::Invalid(format!("boards must be 1 or 2, got {other}"))),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.max_rows == 0 || cfg.max_rows > MAX_ROWS {
        return Err(ConfigError::Invalid(format!(
            "max_rows must be between 1 and {MAX_ROWS}, got {}",
            cfg.max_rows
        )));
    }
    Ok(())
}
