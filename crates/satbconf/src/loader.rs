//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, SatbConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// A provided `cli_path` replaces the local override. It is returned even
/// when missing, so loading it reports the read error.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/satb/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("satb/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("satb.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load a TOML file on top of `base`. Keys the file doesn't set keep their
/// value from `base`.
pub fn load_from_file(path: &Path, base: SatbConfig) -> Result<SatbConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(&contents, path, base)
}

fn invalid(key: &str, path: &Path, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        origin: path.display().to_string(),
        message: message.into(),
    }
}

/// Parse config from TOML string, overlaying it on `base`.
fn parse_toml(contents: &str, path: &Path, base: SatbConfig) -> Result<SatbConfig, ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut config = base;

    if let Some(rules) = table.get("rules").and_then(|v| v.as_table()) {
        if let Some(enabled) = rules.get("enabled") {
            let list = enabled
                .as_array()
                .ok_or_else(|| invalid("rules.enabled", path, "expected a list of rule names"))?;
            config.rules.enabled = list
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("rules.enabled", path, "rule names must be strings"))
                })
                .collect::<Result<_, _>>()?;
        }
    }

    if let Some(logging) = table.get("logging").and_then(|v| v.as_table()) {
        if let Some(v) = logging.get("level").and_then(|v| v.as_str()) {
            config.logging.level = v.to_string();
        }
    }

    if let Some(export) = table.get("export").and_then(|v| v.as_table()) {
        if let Some(v) = export.get("tempo_bpm") {
            let tempo = v
                .as_integer()
                .filter(|t| (1..=u32::MAX as i64).contains(t))
                .ok_or_else(|| invalid("export.tempo_bpm", path, "expected a positive integer"))?;
            config.export.tempo_bpm = tempo as u32;
        }
        if let Some(v) = export.get("output_dir").and_then(|v| v.as_str()) {
            config.export.output_dir = expand_path(v);
        }
    }

    Ok(config)
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(
    config: &mut SatbConfig,
    sources: &mut ConfigSources,
) -> Result<(), ConfigError> {
    apply_overrides_from(config, sources, |name| env::var(name).ok())
}

/// Same as [`apply_env_overrides`], reading variables through `lookup`.
pub fn apply_overrides_from(
    config: &mut SatbConfig,
    sources: &mut ConfigSources,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = lookup("SATB_RULES") {
        config.rules.enabled = v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        sources.env_overrides.push("SATB_RULES".to_string());
    }

    if let Some(v) = lookup("SATB_LOG_LEVEL") {
        config.logging.level = v;
        sources.env_overrides.push("SATB_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.logging.level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }

    if let Some(v) = lookup("SATB_TEMPO_BPM") {
        let tempo: u32 = v
            .trim()
            .parse()
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "export.tempo_bpm".to_string(),
                origin: "SATB_TEMPO_BPM".to_string(),
                message: format!("expected a positive integer, got {:?}", v),
            })?;
        config.export.tempo_bpm = tempo;
        sources.env_overrides.push("SATB_TEMPO_BPM".to_string());
    }

    if let Some(v) = lookup("SATB_OUTPUT_DIR") {
        config.export.output_dir = expand_path(&v);
        sources.env_overrides.push("SATB_OUTPUT_DIR".to_string());
    }

    Ok(())
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            home.join(stripped)
        } else {
            PathBuf::from(path)
        }
    } else if let Some(stripped) = path.strip_prefix('$') {
        // Handle $VAR/rest/of/path
        if let Some(slash_pos) = stripped.find('/') {
            let var_name = &stripped[..slash_pos];
            if let Ok(var_value) = env::var(var_name) {
                PathBuf::from(var_value).join(&stripped[slash_pos + 1..])
            } else {
                PathBuf::from(path)
            }
        } else {
            env::var(stripped)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(path))
        }
    } else {
        PathBuf::from(path)
    }
}
