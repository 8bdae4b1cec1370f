use serde::Serialize;

/// Charge state derived from the sysfs `status` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryState {
    Charging,
    Discharging,
    Full,
    /// Never produced from sysfs; kept so hosts can express a dead battery.
    Empty,
}

impl BatteryState {
    /// Map a raw sysfs status string.  Anything that is not `Full` or
    /// `Charging` (`Discharging`, `Not charging`, `Unknown`, ...) counts as
    /// discharging.
    pub fn from_status(raw: &str) -> Self {
        match raw {
            "Full" => Self::Full,
            "Charging" => Self::Charging,
            _ => Self::Discharging,
        }
    }
}

/// A single battery poll result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub state: BatteryState,
    /// Charge fraction in `[0, 1]`.
    pub percent: f64,
}

/// Connectivity as seen by the network sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetworkReading {
    /// At least one wired interface reports carrier.
    Wired { carriers: u32 },
    /// Wireless interface is associated; `quality` is the raw link quality.
    Wireless { quality: f32 },
    Disconnected,
}

/// Default sink state reported by the mixer helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeReading {
    pub muted: bool,
    /// Volume in percent; `None` when muted (the mixer is not asked).
    pub volume: Option<u32>,
}

/// Render output of one widget, handed to the host panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Widget identifier, e.g. `"battery"`.
    pub name: String,
    /// Glyph or text to display.
    pub full_text: String,
    /// Foreground override as `#rrggbb`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Path of an image to draw instead of `full_text`, when the host supports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Block {
    pub fn new(name: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_text: full_text.into(),
            color: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_full_and_charging() {
        assert_eq!(BatteryState::from_status("Full"), BatteryState::Full);
        assert_eq!(BatteryState::from_status("Charging"), BatteryState::Charging);
    }

    #[test]
    fn other_statuses_are_discharging() {
        for raw in ["Discharging", "Not charging", "Unknown", "", "full"] {
            assert_eq!(BatteryState::from_status(raw), BatteryState::Discharging, "{raw}");
        }
    }
}
