//! Console configuration.
//!
//! Precedence, lowest to highest: built-in defaults, TOML file, environment.
//!
//! ```toml
//! hit_tolerance = 5.0
//! max_query_len = 128
//! theme = "dark"
//! reporting_year = 2024
//! tick_rate_ms = 250
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RegistryError, RegistryResult};
use crate::filter::DEFAULT_MAX_QUERY_LEN;
use crate::spatial::DEFAULT_HIT_TOLERANCE;
use crate::tracing_config::span_names;

pub const ENV_HIT_TOLERANCE: &str = "FORESTGUARD_HIT_TOLERANCE";
pub const ENV_MAX_QUERY_LEN: &str = "FORESTGUARD_MAX_QUERY_LEN";
pub const ENV_THEME: &str = "FORESTGUARD_THEME";
pub const ENV_REPORTING_YEAR: &str = "FORESTGUARD_REPORTING_YEAR";
pub const ENV_TICK_RATE_MS: &str = "FORESTGUARD_TICK_RATE_MS";

const MIN_TICK_RATE_MS: u64 = 10;
const MAX_TICK_RATE_MS: u64 = 5_000;

// ─── Theme Name ─────────────────────────────────────────────────────────────

/// Which color preset the console starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl FromStr for ThemeName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

// ─── Console Config ─────────────────────────────────────────────────────────

/// Tunables for the console binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Map click radius, in normalized units.
    pub hit_tolerance: f64,
    /// Longest accepted search query, in characters.
    pub max_query_len: usize,
    pub theme: ThemeName,
    /// Year counted as "this year" in incident statistics.
    pub reporting_year: i32,
    /// Input poll interval.
    pub tick_rate_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            max_query_len: DEFAULT_MAX_QUERY_LEN,
            theme: ThemeName::Dark,
            reporting_year: 2024,
            tick_rate_ms: 250,
        }
    }
}

impl ConsoleConfig {
    /// Reject values the console cannot run with.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> RegistryResult<()> {
        if !self.hit_tolerance.is_finite() || self.hit_tolerance <= 0.0 || self.hit_tolerance > 100.0
        {
            return Err(invalid(
                "hit_tolerance",
                self.hit_tolerance,
                "must be in (0, 100]",
            ));
        }
        if self.max_query_len == 0 {
            return Err(invalid("max_query_len", self.max_query_len, "must be at least 1"));
        }
        if !(1900..=9999).contains(&self.reporting_year) {
            return Err(invalid(
                "reporting_year",
                self.reporting_year,
                "must be a four-digit year",
            ));
        }
        if !(MIN_TICK_RATE_MS..=MAX_TICK_RATE_MS).contains(&self.tick_rate_ms) {
            return Err(invalid(
                "tick_rate_ms",
                self.tick_rate_ms,
                "must be between 10 and 5000",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl fmt::Display, reason: &str) -> RegistryError {
    RegistryError::InvalidConfig {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

// ─── Loading ────────────────────────────────────────────────────────────────

/// Result of a config load, with provenance for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLoadResult {
    pub config: ConsoleConfig,
    pub config_file_used: Option<PathBuf>,
    pub env_keys_used: Vec<String>,
}

/// `$XDG_CONFIG_HOME/forestguard/config.toml`, else
/// `~/.config/forestguard/config.toml`.
#[must_use]
pub fn default_config_file_path(home_dir: &Path) -> PathBuf {
    if let Some(xdg_config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home)
            .join("forestguard")
            .join("config.toml");
    }
    home_dir.join(".config").join("forestguard").join("config.toml")
}

/// Load from a file on disk plus environment overrides.
///
/// An explicit `config_file` must exist. Without one, the default path is
/// used when present and skipped otherwise.
///
/// # Errors
///
/// [`RegistryError::Io`] when an explicit file cannot be read, and
/// [`RegistryError::InvalidConfig`] for parse or validation failures.
pub fn load_from_sources<S: BuildHasher>(
    config_file: Option<&Path>,
    env: &HashMap<String, String, S>,
    home_dir: &Path,
) -> RegistryResult<ConfigLoadResult> {
    let path = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None => Some(default_config_file_path(home_dir)).filter(|path| path.exists()),
    };
    let contents = path.as_deref().map(fs::read_to_string).transpose()?;
    load_from_str(contents.as_deref(), path.as_deref(), env)
}

/// Load from raw TOML plus environment overrides.
///
/// # Errors
///
/// [`RegistryError::InvalidConfig`] for parse or validation failures.
pub fn load_from_str<S: BuildHasher>(
    config_toml: Option<&str>,
    config_file_path: Option<&Path>,
    env: &HashMap<String, String, S>,
) -> RegistryResult<ConfigLoadResult> {
    let mut config = match config_toml {
        Some(text) => toml::from_str(text).map_err(|error| RegistryError::InvalidConfig {
            field: "config_file".into(),
            value: "<toml>".into(),
            reason: error.to_string(),
        })?,
        None => ConsoleConfig::default(),
    };
    let env_keys_used = apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        config_file_used: config_file_path.map(Path::to_path_buf),
        env_keys_used,
    })
}

fn apply_env_overrides<S: BuildHasher>(
    config: &mut ConsoleConfig,
    env: &HashMap<String, String, S>,
) -> RegistryResult<Vec<String>> {
    let mut keys_used = Vec::new();

    if let Some(value) = env.get(ENV_HIT_TOLERANCE) {
        config.hit_tolerance = parse_env(value, "hit_tolerance", "expected a number")?;
        keys_used.push(ENV_HIT_TOLERANCE.into());
    }

    if let Some(value) = env.get(ENV_MAX_QUERY_LEN) {
        config.max_query_len = parse_env(value, "max_query_len", "expected unsigned integer")?;
        keys_used.push(ENV_MAX_QUERY_LEN.into());
    }

    if let Some(value) = env.get(ENV_THEME) {
        config.theme = ThemeName::from_str(value)
            .map_err(|()| invalid("theme", value, "expected dark|light"))?;
        keys_used.push(ENV_THEME.into());
    }

    if let Some(value) = env.get(ENV_REPORTING_YEAR) {
        config.reporting_year = parse_env(value, "reporting_year", "expected a year")?;
        keys_used.push(ENV_REPORTING_YEAR.into());
    }

    if let Some(value) = env.get(ENV_TICK_RATE_MS) {
        config.tick_rate_ms = parse_env(value, "tick_rate_ms", "expected milliseconds")?;
        keys_used.push(ENV_TICK_RATE_MS.into());
    }

    Ok(keys_used)
}

fn parse_env<T: FromStr>(value: &str, field: &str, reason: &str) -> RegistryResult<T> {
    value.trim().parse().map_err(|_| invalid(field, value, reason))
}

/// Log where the effective config came from.
pub fn emit_config_loaded(result: &ConfigLoadResult) {
    info!(
        target: span_names::CONFIG,
        file = ?result.config_file_used,
        env_keys = ?result.env_keys_used,
        theme = %result.config.theme,
        hit_tolerance = result.config.hit_tolerance,
        max_query_len = result.config.max_query_len,
        "config loaded"
    );
}
