pub mod schema;
pub mod watcher;

pub use schema::{
    poll_interval, BatteryConfig, BatteryId, GlobalConfig, KeyboardConfig, NetworkConfig,
    PanelConfig, ThemeConfig, VolumeConfig, MAX_INTERVAL, MIN_INTERVAL, WIDGET_KINDS,
};
pub use watcher::ConfigWatcher;

use nerdbar_core::{PanelError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `PanelConfig::default()` if
/// the file doesn't exist so the panel always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<PanelConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PanelConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PanelError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: PanelConfig =
        toml::from_str(&raw).map_err(|e| PanelError::Config(format!("TOML parse error: {e}")))?;
    config.validate().map_err(PanelError::Config)?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("nerdbar").join("nerdbar.toml")
}
