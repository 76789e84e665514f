// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - the `--config-dir` CLI argument, or a test path
//! 2. **Environment variable** (`REPLAY_REPEAT_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate
//!
//! The override is passed down explicitly rather than stored in a global.

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "ReplayRepeat";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "REPLAY_REPEAT_CONFIG_DIR";

/// Returns the application config directory path with an optional override.
///
/// # Arguments
///
/// * `override_path` - Optional path to use instead of default. Takes highest priority.
///
/// Platform defaults:
/// - Linux: `~/.config/ReplayRepeat/`
/// - macOS: `~/Library/Application Support/ReplayRepeat/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\ReplayRepeat\`
///
/// Returns `None` if the config directory cannot be determined (rare edge case).
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
