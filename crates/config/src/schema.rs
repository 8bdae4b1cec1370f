use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Widget kinds accepted in `[global] layout`.
pub const WIDGET_KINDS: [&str; 4] = ["battery", "network", "keyboard", "volume"];

/// Shortest poll period a widget may use.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);
/// Longest poll period a widget may use.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Convert `update_interval` seconds to a poll period within
/// `[MIN_INTERVAL, MAX_INTERVAL]`.  Validated configs are never clamped.
pub fn poll_interval(secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(period) => period.clamp(MIN_INTERVAL, MAX_INTERVAL),
        Err(_) if secs > 0.0 => MAX_INTERVAL,
        Err(_) => MIN_INTERVAL,
    }
}

/// Root configuration structure parsed from `nerdbar.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub global: GlobalConfig,
    pub theme: ThemeConfig,
    pub battery: BatteryConfig,
    pub network: NetworkConfig,
    pub keyboard: KeyboardConfig,
    pub volume: VolumeConfig,
}

/// Settings shared by every widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Widget kinds in display order, left to right.
    pub layout: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            layout: ["keyboard", "volume", "network", "battery"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Primary text/foreground color (hex, e.g. `"#cdd6f4"`).
    pub foreground: String,
    /// Accent color used for error blocks.
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            foreground: "#abb2bf".to_string(),
            accent:     "#e06c75".to_string(),
        }
    }
}

/// Which battery to monitor: `0` → `"BAT0"`, or a raw ACPI name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatteryId {
    Index(u32),
    Name(String),
}

impl BatteryId {
    /// Directory name under the power-supply base directory.
    pub fn dir_name(&self) -> String {
        match self {
            Self::Index(n) => format!("BAT{n}"),
            Self::Name(name) => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// `None` = first `BAT*` entry found under `base_dir`.
    pub battery: Option<BatteryId>,
    /// Name of the status file inside the battery directory.
    pub status_file: Option<String>,
    /// Name of the file with the current energy.
    pub energy_now_file: Option<String>,
    /// Name of the file with the maximum energy.
    pub energy_full_file: Option<String>,
    pub base_dir: PathBuf,
    /// Seconds between status updates.
    pub update_interval: f64,
    /// Below this fraction a discharging battery uses `low_foreground`.
    pub low_percentage: f64,
    pub low_foreground: String,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            battery:          None,
            status_file:      None,
            energy_now_file:  None,
            energy_full_file: None,
            base_dir:         PathBuf::from("/sys/class/power_supply"),
            update_interval:  60.0,
            low_percentage:   0.10,
            low_foreground:   "FF0000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// The wlan interface to monitor.
    pub interface: String,
    /// Wired interfaces are `/sys/class/net/<prefix>*`.
    pub wired_prefix: String,
    pub net_dir: PathBuf,
    pub wireless_file: PathBuf,
    /// Link quality that counts as a full-strength signal.
    pub max_quality: f32,
    pub update_interval: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interface:       "wlan0".to_string(),
            wired_prefix:    "enp".to_string(),
            net_dir:         PathBuf::from("/sys/class/net"),
            wireless_file:   PathBuf::from("/proc/net/wireless"),
            max_quality:     70.0,
            update_interval: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Program and arguments printing the active layout.
    pub command: Vec<String>,
    pub update_interval: f64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            command: ["xkblayout-state", "print", "%s"].map(String::from).to_vec(),
            update_interval: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Mixer helper supporting `--get-mute` and `--get-volume`.
    pub mixer: String,
    /// Directory holding `volume_{off,low,medium,high}.png`.
    pub theme_path: Option<PathBuf>,
    pub update_interval: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            mixer:           "pamixer".to_string(),
            theme_path:      None,
            update_interval: 0.2,
        }
    }
}

impl PanelConfig {
    /// Reject values that would make a widget misbehave at runtime.
    pub fn validate(&self) -> Result<(), String> {
        for kind in &self.global.layout {
            if !WIDGET_KINDS.contains(&kind.as_str()) {
                return Err(format!("unknown widget '{kind}' in layout"));
            }
        }

        let intervals = [
            ("battery", self.battery.update_interval),
            ("network", self.network.update_interval),
            ("keyboard", self.keyboard.update_interval),
            ("volume", self.volume.update_interval),
        ];
        for (name, secs) in intervals {
            match Duration::try_from_secs_f64(secs) {
                Ok(period) if (MIN_INTERVAL..=MAX_INTERVAL).contains(&period) => {}
                _ => {
                    return Err(format!(
                        "{name}.update_interval must be between {} and {} seconds, got {secs}",
                        MIN_INTERVAL.as_secs_f64(),
                        MAX_INTERVAL.as_secs_f64(),
                    ))
                }
            }
        }

        if !(0.0..=1.0).contains(&self.battery.low_percentage) {
            return Err(format!(
                "battery.low_percentage must be within [0, 1], got {}",
                self.battery.low_percentage
            ));
        }
        if !(self.network.max_quality.is_finite() && self.network.max_quality > 0.0) {
            return Err("network.max_quality must be positive".into());
        }
        if self.keyboard.command.is_empty() {
            return Err("keyboard.command must name a program".into());
        }
        Ok(())
    }
}
