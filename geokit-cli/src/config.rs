//! Configuration file management for the `geokit` binary.
//!
//! Reads/writes `~/.geokit/config.yaml` with the defaults used when a
//! command omits `--precision` or `--unit`. `GEOKIT_PRECISION` and
//! `GEOKIT_UNIT` override the file.

use std::io;
use std::path::{Path, PathBuf};

use geokit_core::{DistanceUnit, DEFAULT_PRECISION};

pub const ENV_PRECISION: &str = "GEOKIT_PRECISION";
pub const ENV_UNIT: &str = "GEOKIT_UNIT";

/// Full configuration structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub geohash: GeohashConfig,
    pub distance: DistanceConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeohashConfig {
    pub precision: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceConfig {
    pub unit: DistanceUnit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            geohash: GeohashConfig {
                precision: DEFAULT_PRECISION,
            },
            distance: DistanceConfig {
                unit: DistanceUnit::Kilometers,
            },
        }
    }
}

impl Config {
    /// Apply `GEOKIT_PRECISION` / `GEOKIT_UNIT` from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_PRECISION).ok().as_deref(),
            std::env::var(ENV_UNIT).ok().as_deref(),
        )
    }

    fn apply_overrides(mut self, precision: Option<&str>, unit: Option<&str>) -> Self {
        if let Some(val) = precision {
            match parse_precision(val) {
                Some(p) => self.geohash.precision = p,
                None => tracing::warn!(
                    "Invalid {} value '{}': expected a positive integer",
                    ENV_PRECISION,
                    val
                ),
            }
        }
        if let Some(val) = unit {
            self.distance.unit = DistanceUnit::from_name(val);
        }
        self
    }
}

/// Get the config directory path (`~/.geokit/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".geokit")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load config from `~/.geokit/config.yaml`.
///
/// Returns default config if file doesn't exist.
pub fn load_config() -> Config {
    load_config_from(&config_file())
}

/// Load config from an explicit path. Missing or unreadable files yield
/// the defaults.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!("Loaded config from {}", path.display());
            parse_config(&text)
        }
        Err(e) => {
            tracing::warn!("Could not read {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save config to `~/.geokit/config.yaml`.
pub fn save_config(config: &Config) -> io::Result<PathBuf> {
    save_config_to(config, &config_file())
}

/// Save config to an explicit path, creating parent directories.
pub fn save_config_to(config: &Config, path: &Path) -> io::Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    std::fs::write(path, serialize_config(config))?;
    tracing::debug!("Saved config to {}", path.display());

    Ok(path.to_path_buf())
}

/// Parse simple YAML-like config text. Unknown keys are ignored.
fn parse_config(text: &str) -> Config {
    let mut config = Config::default();
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let is_indented = line.starts_with("  ") || line.starts_with('\t');

        let Some((key, val)) = stripped.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let val = val.trim();

        if !is_indented {
            current_section = val.is_empty().then(|| key.to_string());
            continue;
        }

        match (current_section.as_deref(), key) {
            (Some("geohash"), "precision") => match parse_precision(val) {
                Some(p) => config.geohash.precision = p,
                None => tracing::warn!(
                    "Ignoring geohash.precision '{}': expected a positive integer",
                    val
                ),
            },
            (Some("distance"), "unit") => {
                if let Some(v) = parse_string_value(val) {
                    config.distance.unit = DistanceUnit::from_name(&v);
                }
            }
            _ => {}
        }
    }

    config
}

fn parse_precision(val: &str) -> Option<usize> {
    val.trim().parse::<usize>().ok().filter(|&p| p > 0)
}

fn parse_string_value(val: &str) -> Option<String> {
    if val == "null" || val == "~" || val.is_empty() {
        return None;
    }
    // Strip quotes
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        return Some(val[1..val.len() - 1].to_string());
    }
    Some(val.to_string())
}

/// Serialize config to YAML-like text.
fn serialize_config(config: &Config) -> String {
    let lines = [
        "# geokit configuration".to_string(),
        String::new(),
        "geohash:".into(),
        format!("  precision: {}", config.geohash.precision),
        String::new(),
        "distance:".into(),
        format!("  unit: \"{}\"", config.distance.unit),
    ];

    lines.join("\n") + "\n"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
