//! Application-level configuration loading: storage location and the draw/spin pacing.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::{draw::DrawTimings, wheel::SpinSettings};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LUCK_CENTER_BACK_CONFIG_PATH";
/// Default file holding the persisted preferences.
const DEFAULT_STORAGE_PATH: &str = "data/preferences.json";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Preferences file; `None` keeps preferences in memory only.
    pub storage_path: Option<PathBuf>,
    /// Pacing of the team draw reveal.
    pub draw: DrawTimings,
    /// Shape and pacing of wheel spins.
    pub spin: SpinSettings,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        storage = ?app_config.storage_path,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Configuration with in-memory preferences and the given pacing, handy for tests.
    pub fn in_memory(draw: DrawTimings, spin: SpinSettings) -> Self {
        Self {
            storage_path: None,
            draw,
            spin,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: Some(PathBuf::from(DEFAULT_STORAGE_PATH)),
            draw: DrawTimings::default(),
            spin: SpinSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    /// `null` disables persistence, absent uses [`DEFAULT_STORAGE_PATH`].
    #[serde(default = "default_storage_path")]
    storage_path: Option<String>,
    draw: RawDraw,
    spin: RawSpin,
}

fn default_storage_path() -> Option<String> {
    Some(DEFAULT_STORAGE_PATH.to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// Draw pacing overrides, in milliseconds.
struct RawDraw {
    frame_tick_ms: Option<u64>,
    settle_ms: Option<u64>,
    step_gap_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// Spin overrides.
struct RawSpin {
    duration_ms: Option<u64>,
    tick_interval_ms: Option<u64>,
    tick_count: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let draw_defaults = DrawTimings::default();
        let spin_defaults = SpinSettings::default();

        let draw = DrawTimings {
            frame_tick: millis_or(value.draw.frame_tick_ms, draw_defaults.frame_tick),
            settle: millis_or(value.draw.settle_ms, draw_defaults.settle),
            step_gap: millis_or(value.draw.step_gap_ms, draw_defaults.step_gap),
        };
        let spin = SpinSettings {
            duration: millis_or(value.spin.duration_ms, spin_defaults.duration),
            tick_interval: millis_or(value.spin.tick_interval_ms, spin_defaults.tick_interval),
            tick_count: value.spin.tick_count.unwrap_or(spin_defaults.tick_count),
            ..spin_defaults
        };

        Self {
            storage_path: value
                .storage_path
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            draw,
            spin,
        }
    }
}

fn millis_or(value: Option<u64>, fallback: Duration) -> Duration {
    value.map(Duration::from_millis).unwrap_or(fallback)
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{ "draw": { "settle_ms": 120 }, "spin": { "tick_count": 3 } }"#)
                .unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.storage_path, Some(PathBuf::from(DEFAULT_STORAGE_PATH)));
        assert_eq!(config.draw.settle, Duration::from_millis(120));
        assert_eq!(config.draw.frame_tick, DrawTimings::default().frame_tick);
        assert_eq!(config.spin.tick_count, 3);
        assert_eq!(config.spin.duration, Duration::from_millis(4_000));
    }

    #[test]
    fn null_storage_path_disables_persistence() {
        let raw: RawConfig = serde_json::from_str(r#"{ "storage_path": null }"#).unwrap();
        assert_eq!(AppConfig::from(raw).storage_path, None);
    }
}
