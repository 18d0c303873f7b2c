//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, source, delivery-mode, live-window and reload settings. Every
//! section defaults sensibly so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::media::DeliveryMode;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    /// Delivery modes mounted by the HTTP layer.
    pub modes: Vec<DeliveryMode>,
    pub live: LiveConfig,
    pub reload: ReloadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            source: SourceConfig::default(),
            modes: DeliveryMode::ALL.to_vec(),
            live: LiveConfig::default(),
            reload: ReloadConfig::default(),
        }
    }
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Whether the given delivery mode should be served.
    pub fn mode_enabled(&self, mode: DeliveryMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if !self.source.master_playlist.exists() {
            warnings.push(format!(
                "source.master_playlist {} does not exist",
                self.source.master_playlist.display()
            ));
        }

        if self.modes.is_empty() {
            warnings.push("modes is empty; no playlists will be served".into());
        }

        let mut seen = HashSet::new();
        for mode in &self.modes {
            if !seen.insert(*mode) {
                warnings.push(format!("modes lists '{mode}' more than once"));
            }
        }

        if self.live.window_segments == 0 {
            warnings.push("live.window_segments is 0; a single segment will be published".into());
        }

        if self.reload.interval_secs == Some(0) {
            warnings.push("reload.interval_secs is 0; periodic reload is disabled".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Location of the on-disk playlist tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub master_playlist: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            master_playlist: PathBuf::from("./contents/playlist.m3u8"),
        }
    }
}

/// Sliding-window settings for live delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    #[serde(default = "default_window_segments")]
    pub window_segments: usize,
}

fn default_window_segments() -> usize {
    3
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            window_segments: default_window_segments(),
        }
    }
}

/// Periodic re-parse of the source tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Seconds between reloads; `None` disables the reload task.
    pub interval_secs: Option<u64>,
}

impl ReloadConfig {
    /// Effective reload period, ignoring a zero interval.
    pub fn interval(&self) -> Option<std::time::Duration> {
        self.interval_secs
            .filter(|secs| *secs > 0)
            .map(std::time::Duration::from_secs)
    }
}
