//! Configuration loading from TOML.
//!
//! Reads `config.toml` into strongly-typed structs. Every section is
//! optional; a missing file yields the defaults (feeds and report in the
//! working directory, in-order replay, no snapshot).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::replay::ReplayConfig;

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub feeds: FeedsConfig,
    pub replay: ReplaySection,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedsConfig {
    pub players: String,
    pub matches: String,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            players: "player_data.txt".to_string(),
            matches: "match_data.txt".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ReplaySection {
    /// Apply all deposits before any withdrawal or bet.
    pub deposits_first: bool,
}

impl From<&ReplaySection> for ReplayConfig {
    fn from(section: &ReplaySection) -> Self {
        ReplayConfig {
            deposits_first: section.deposits_first,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub path: String,
    /// Optional JSON snapshot of the final ledger.
    pub snapshot_path: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: "results.txt".to_string(),
            snapshot_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
