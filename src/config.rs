//! Driver configuration.
//!
//! Read from `qail-oracle.toml` in the working directory, or
//! `<config dir>/qail/oracle.toml`. Every field has a default, so an absent
//! file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OracleError, OracleResult};
use crate::shortener::{DEFAULT_ALIAS_PREFIX, DEFAULT_MAX_IDENTIFIER_LENGTH};

/// Session setup run on every connect: fixed NLS formats so dates
/// round-trip as `YYYY-MM-DD HH24:MI:SS` text.
pub const NLS_SESSION_INIT: &str = "ALTER SESSION SET NLS_DATE_FORMAT='YYYY-MM-DD HH24:MI:SS' NLS_TIMESTAMP_FORMAT='YYYY-MM-DD HH24:MI:SS' NLS_TIMESTAMP_TZ_FORMAT='YYYY-MM-DD HH24:MI:SS'";

/// Local config file name.
pub const LOCAL_CONFIG_FILE: &str = "qail-oracle.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Identifiers longer than this are replaced by generated aliases.
    pub max_identifier_length: usize,
    pub shortened_prefix: String,
    pub quote_identifiers: bool,
    /// Default schema (owner). `None` uses the session user's schema.
    pub schema: Option<String>,
    /// Buffer SELECT results in memory on execute.
    pub buffer_results: bool,
    /// Extra statements run after connecting, after the NLS setup.
    pub init: Vec<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
            shortened_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            quote_identifiers: true,
            schema: None,
            buffer_results: true,
            init: Vec::new(),
        }
    }
}

impl OracleConfig {
    /// Load from an explicit path.
    pub fn load(path: &Path) -> OracleResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: OracleConfig = toml::from_str(&content)
            .map_err(|e| OracleError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the first config file found, or fall back to defaults.
    pub fn load_default() -> OracleResult<Self> {
        match Self::search_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("qail").join("oracle.toml"));
        }
        paths
    }

    /// Session commands in execution order.
    pub fn session_init(&self) -> Vec<String> {
        let mut commands = Vec::with_capacity(self.init.len() + 1);
        commands.push(NLS_SESSION_INIT.to_string());
        commands.extend(self.init.iter().cloned());
        commands
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}
