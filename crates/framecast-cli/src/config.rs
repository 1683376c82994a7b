//! Configuration – reads `~/.framecast/config.toml`.
//!
//! The file is optional: a missing file means reference defaults (the
//! 500 ms / 50 ms cadence and the fixed three-frame scene).  Individual
//! fields may be omitted and fall back per-field.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use framecast_runtime::{BroadcastTiming, SceneConfig};
use framecast_types::FramecastError;
use serde::{Deserialize, Serialize};

/// Persisted user configuration stored in `~/.framecast/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Interval between broadcast cycles, milliseconds.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    /// Pause before the first cycle, milliseconds.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,

    /// Scene inputs (frame names and pose parameters).
    #[serde(default)]
    pub scene: SceneConfig,
}

fn default_period_ms() -> u64 {
    50
}
fn default_startup_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            startup_delay_ms: default_startup_delay_ms(),
            scene: SceneConfig::default(),
        }
    }
}

impl Config {
    /// The broadcast cadence this config describes.
    pub fn timing(&self) -> BroadcastTiming {
        BroadcastTiming {
            startup_delay: Duration::from_millis(self.startup_delay_ms),
            period: Duration::from_millis(self.period_ms),
        }
    }
}

/// Return the path to `~/.framecast/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".framecast").join("config.toml")
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, FramecastError> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, FramecastError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        FramecastError::Config(format!("failed to read config at {}: {}", path.display(), e))
    })?;
    let cfg: Config = toml::from_str(&raw)
        .map_err(|e| FramecastError::Config(format!("failed to parse config: {}", e)))?;
    Ok(Some(cfg))
}

/// Apply `FRAMECAST_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `FRAMECAST_PERIOD_MS` | `period_ms` |
/// | `FRAMECAST_STARTUP_DELAY_MS` | `startup_delay_ms` |
///
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("FRAMECAST_PERIOD_MS")
        && let Ok(ms) = v.parse::<u64>()
    {
        cfg.period_ms = ms;
    }
    if let Ok(v) = std::env::var("FRAMECAST_STARTUP_DELAY_MS")
        && let Ok(ms) = v.parse::<u64>()
    {
        cfg.startup_delay_ms = ms;
    }
}
