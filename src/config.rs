//! Database configuration from TOML files and environment variables.
//!
//! Precedence: an explicit file, then `KERADB_CONFIG`, then `./keradb.toml`, then defaults.
//! Earlier files win field by field. Environment variables are applied last and override
//! whatever the files set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::DbError;

pub const CONFIG_ENV: &str = "KERADB_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "keradb.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    /// JSON snapshot backing the store; in-memory only when unset.
    pub snapshot_path: Option<PathBuf>,
    /// Directory for rolling log files; logging is left alone when unset.
    pub log_dir: Option<PathBuf>,
    /// error | warn | info | debug | trace
    pub log_level: Option<String>,
    /// Rolled files kept per log.
    pub log_retention: Option<usize>,
    /// Route `dev6!` bench lines to `dev6.log`.
    pub dev_trace: Option<bool>,
}

impl DbConfig {
    /// # Errors
    /// `DbError::Config` if the text is not a valid configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, DbError> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    /// An I/O error if the file cannot be read, or `DbError::Config` if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, DbError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DbError::Io(format!("reading config {}: {e}", path.display())))?;
        toml::from_str(&text).map_err(|e| DbError::Config(format!("{}: {e}", path.display())))
    }

    /// Resolves configuration from files and the process environment.
    ///
    /// # Errors
    /// An explicit file that is missing or malformed is an error; so is a malformed file
    /// found on the search path.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DbError> {
        let mut cfg = Self::default();
        if let Some(p) = explicit {
            cfg.fill_from(Self::from_file(p)?);
        }
        let mut candidates = Vec::new();
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            candidates.push(PathBuf::from(p));
        }
        if let Ok(cur) = std::env::current_dir() {
            candidates.push(cur.join(DEFAULT_CONFIG_FILE));
        }
        for p in candidates.iter().filter(|p| p.exists()) {
            log::debug!("loading config {}", p.display());
            cfg.fill_from(Self::from_file(p)?);
        }
        cfg.apply_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    /// Takes every field still unset from `other`.
    pub fn fill_from(&mut self, other: Self) {
        if self.snapshot_path.is_none() {
            self.snapshot_path = other.snapshot_path;
        }
        if self.log_dir.is_none() {
            self.log_dir = other.log_dir;
        }
        if self.log_level.is_none() {
            self.log_level = other.log_level;
        }
        if self.log_retention.is_none() {
            self.log_retention = other.log_retention;
        }
        if self.dev_trace.is_none() {
            self.dev_trace = other.dev_trace;
        }
    }

    /// Overrides fields from `KERADB_*` variables looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(s) = var("KERADB_SNAPSHOT") {
            self.snapshot_path = Some(PathBuf::from(s));
        }
        if let Some(s) = var("KERADB_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(s));
        }
        if let Some(s) = var("KERADB_LOG_LEVEL") {
            self.log_level = Some(s);
        }
        if let Some(n) = var("KERADB_LOG_RETENTION").and_then(|s| s.parse().ok()) {
            self.log_retention = Some(n);
        }
        if let Some(s) = var("KERADB_DEV6") {
            self.dev_trace = Some(crate::utils::logger::truthy(&s));
        }
    }

    /// Installs the log4rs configuration described here, if a log directory is set.
    ///
    /// # Errors
    /// Propagates failures creating the directory or building the appenders.
    pub fn init_logging(&self) -> Result<(), DbError> {
        let Some(dir) = &self.log_dir else { return Ok(()) };
        crate::utils::logger::configure_logging_with_dev(
            Some(dir.as_path()),
            self.log_level.as_deref(),
            self.log_retention,
            self.dev_trace.unwrap_or(false),
        )
    }
}
