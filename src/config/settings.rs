//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::SweepConfig;
use g5_panel_core::DEFAULT_TELEMETRY_INTERVAL_MS;

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the config format
    pub version: u32,
    /// Window dimensions
    pub window: WindowConfig,
    /// Instrument ids to show, left to right
    pub instruments: Vec<String>,
    /// Telemetry playback settings
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "g5-panel", "g5-panel")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            window: WindowConfig::default(),
            instruments: vec!["engine".to_string()],
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 120,
            title: "G5 Engine".to_string(),
        }
    }
}

/// Telemetry playback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// How often a batch is pulled from the active source
    pub interval_ms: u64,
    /// Demo sweep used when no replay file is given
    pub sweep: SweepConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TELEMETRY_INTERVAL_MS,
            sweep: SweepConfig::default(),
        }
    }
}
