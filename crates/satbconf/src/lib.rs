//! Configuration loading for the SATB harmony checker.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins, field by field):
//! 1. `/etc/satb/config.toml` (system)
//! 2. `~/.config/satb/config.toml` (user)
//! 3. `./satb.toml` (local override), or the `--config` path when given
//! 4. Environment variables (`SATB_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [rules]
//! enabled = ["RANGE", "LEAPS", "PARALELS"]
//!
//! [logging]
//! level = "debug"
//!
//! [export]
//! tempo_bpm = 72
//! output_dir = "~/music/midi"
//! ```

pub mod loader;

pub use loader::{discover_config_files_with_override, ConfigSources};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key} in {origin}: {message}")]
    InvalidValue {
        key: String,
        origin: String,
        message: String,
    },
}

/// Which rules run when none are named on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub enabled: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["ALL".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `satb=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub tempo_bpm: u32,
    /// Where exported playback models are written
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 90,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Complete checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SatbConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl SatbConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with an explicit file replacing `./satb.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = SatbConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            config = loader::load_from_file(&path, config)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources)?;

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# SATB checker configuration\n\n");

        output.push_str("[rules]\n");
        let rules: Vec<_> = self
            .rules
            .enabled
            .iter()
            .map(|r| format!("\"{}\"", r))
            .collect();
        output.push_str(&format!("enabled = [{}]\n", rules.join(", ")));

        output.push_str("\n[logging]\n");
        output.push_str(&format!("level = \"{}\"\n", self.logging.level));

        output.push_str("\n[export]\n");
        output.push_str(&format!("tempo_bpm = {}\n", self.export.tempo_bpm));
        output.push_str(&format!(
            "output_dir = \"{}\"\n",
            self.export.output_dir.display()
        ));

        output
    }
}
