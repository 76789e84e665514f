// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[loop]` - Range-loop behavior (fallback end offset, enabled on start)
//! - `[demo]` - Timing of the simulated host page
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()` (the `--config-dir` flag)
//! 3. Set `REPLAY_REPEAT_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use replay_repeat::config;
//!
//! // `None` resolves the directory from the environment or the platform
//! let (mut config, _warning) = config::load_with_override(None);
//!
//! config.general.language = Some("ko".to_string());
//!
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::application::LoopSettings;
use crate::error::{Error, Result};
use crate::infrastructure::PageScript;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "ko").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Range-loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoopConfig {
    /// Range length used by "set start" while the media duration is unknown.
    #[serde(
        default = "default_fallback_end_offset_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub fallback_end_offset_secs: Option<f64>,

    /// Whether looping starts enabled once a surface is acquired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_on_start: Option<bool>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fallback_end_offset_secs: default_fallback_end_offset_secs(),
            enabled_on_start: Some(false),
        }
    }
}

/// Simulated host page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoConfig {
    /// Duration of the simulated video in seconds.
    #[serde(
        default = "default_video_duration_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_duration_secs: Option<f64>,

    /// Delay before the `<video>` element is inserted (milliseconds).
    #[serde(
        default = "default_video_appears_after_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_appears_after_ms: Option<u64>,

    /// Host event-loop tick (milliseconds).
    #[serde(
        default = "default_tick_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub tick_interval_ms: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            video_duration_secs: default_video_duration_secs(),
            video_appears_after_ms: default_video_appears_after_ms(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default, rename = "loop")]
    pub looping: LoopConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Loop controller settings, with out-of-range values clamped.
    #[must_use]
    pub fn loop_settings(&self) -> LoopSettings {
        let offset = self
            .looping
            .fallback_end_offset_secs
            .filter(|value| value.is_finite())
            .unwrap_or(DEFAULT_FALLBACK_END_OFFSET_SECS)
            .clamp(MIN_FALLBACK_END_OFFSET_SECS, MAX_FALLBACK_END_OFFSET_SECS);

        LoopSettings {
            fallback_end_offset_secs: offset,
            enabled_on_start: self.looping.enabled_on_start.unwrap_or(false),
        }
    }

    /// Script for the simulated host page.
    #[must_use]
    pub fn page_script(&self) -> PageScript {
        let duration = self
            .demo
            .video_duration_secs
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(DEFAULT_VIDEO_DURATION_SECS);

        PageScript {
            video_duration_secs: duration,
            video_appears_after: Duration::from_millis(
                self.demo
                    .video_appears_after_ms
                    .unwrap_or(DEFAULT_VIDEO_APPEARS_AFTER_MS),
            ),
        }
    }

    /// Host tick interval, clamped to the supported range.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        let millis = self
            .demo
            .tick_interval_ms
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
            .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
        Duration::from_millis(millis)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_fallback_end_offset_secs() -> Option<f64> {
    Some(DEFAULT_FALLBACK_END_OFFSET_SECS)
}

fn default_video_duration_secs() -> Option<f64> {
    Some(DEFAULT_VIDEO_DURATION_SECS)
}

fn default_video_appears_after_ms() -> Option<u64> {
    Some(DEFAULT_VIDEO_APPEARS_AFTER_MS)
}

fn default_tick_interval_ms() -> Option<u64> {
    Some(DEFAULT_TICK_INTERVAL_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from `base_dir`, or the resolved default
/// directory when `None`.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = %path.display(), %err, "config unreadable, using defaults");
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to `base_dir`, or the resolved default directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
