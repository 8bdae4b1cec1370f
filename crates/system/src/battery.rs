//! Battery telemetry from the Linux sysfs power-supply interface.
//!
//! Vendors disagree on file names (`charge_now` vs `energy_now`), so every
//! logical attribute has a list of candidate files.  The first candidate that
//! exists is remembered per resolver and tried first on later polls.

use nerdbar_core::{BatteryReading, BatteryState, PanelError, Result, Sensor};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
const BATTERY_PREFIX: &str = "BAT";
const FALLBACK_BATTERY: &str = "BAT0";

/// A logical battery attribute backed by one of several sysfs files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Status,
    EnergyNow,
    EnergyFull,
}

impl Attribute {
    /// Config key naming the attribute, also used in error messages.
    pub fn key(self) -> &'static str {
        match self {
            Self::Status => "status_file",
            Self::EnergyNow => "energy_now_file",
            Self::EnergyFull => "energy_full_file",
        }
    }

    /// Built-in candidate file names, most common first.
    pub fn default_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Status => &["status"],
            Self::EnergyNow => &["charge_now", "energy_now"],
            Self::EnergyFull => &["charge_full", "energy_full"],
        }
    }
}

/// User overrides for the three attribute file names.
#[derive(Debug, Clone, Default)]
pub struct FileOverrides {
    pub status: Option<String>,
    pub energy_now: Option<String>,
    pub energy_full: Option<String>,
}

impl FileOverrides {
    fn get(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Status => self.status.as_deref(),
            Attribute::EnergyNow => self.energy_now.as_deref(),
            Attribute::EnergyFull => self.energy_full.as_deref(),
        }
    }
}

/// Resolves and reads one battery's sysfs files.
///
/// The battery name is fixed at construction; swapping batteries while
/// running is not supported.
#[derive(Debug)]
pub struct BatteryTelemetryResolver {
    base: PathBuf,
    battery: String,
    overrides: FileOverrides,
    /// Attribute → file name that last produced a value.
    filenames: HashMap<Attribute, String>,
}

impl BatteryTelemetryResolver {
    /// Create a resolver under `base` (normally [`POWER_SUPPLY_DIR`]).
    ///
    /// With `battery == None` the first `BAT*` entry of `base` is used, or
    /// `BAT0` when there is none.
    pub fn new(base: impl Into<PathBuf>, battery: Option<String>, overrides: FileOverrides) -> Self {
        let base = base.into();
        let battery = battery.unwrap_or_else(|| find_battery(&base));
        debug!("Monitoring battery '{battery}' under {}", base.display());

        Self {
            base,
            battery,
            overrides,
            filenames: HashMap::new(),
        }
    }

    pub fn battery(&self) -> &str {
        &self.battery
    }

    /// File name currently cached for `attribute`, if any.
    pub fn cached_filename(&self, attribute: Attribute) -> Option<&str> {
        self.filenames.get(&attribute).map(String::as_str)
    }

    /// Read `<base>/<battery>/<name>`, trimmed.
    ///
    /// `Ok(None)` means the file does not exist; any other I/O failure is an error.
    pub fn read_file(&self, name: &str) -> std::io::Result<Option<String>> {
        let path = self.base.join(&self.battery).join(name);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("'{}' does not exist", path.display());
                Ok(None)
            }
            Err(e) => {
                debug!("Failed to read '{}': {e}", path.display());
                Err(e)
            }
        }
    }

    /// Read an attribute, trying the cached file name first and then every
    /// candidate in order.  Fails only once all candidates are missing.
    pub fn get_param(&mut self, attribute: Attribute) -> Result<String> {
        if let Some(cached) = self.filenames.get(&attribute) {
            if let Some(value) = self.load(cached)? {
                return Ok(value);
            }
        }

        let candidates = self
            .overrides
            .get(attribute)
            .into_iter()
            .chain(attribute.default_candidates().iter().copied())
            .map(str::to_owned)
            .collect::<Vec<_>>();

        for filename in candidates {
            let loaded = self.load(&filename);
            if matches!(loaded, Ok(None)) {
                continue;
            }
            // The file exists: remember it even when reading it failed.
            self.filenames.insert(attribute, filename);
            if let Some(value) = loaded? {
                return Ok(value);
            }
        }

        Err(PanelError::AttributeExhausted {
            attribute: attribute.key(),
        })
    }

    /// Poll status and energy files into a normalized reading.
    ///
    /// A `Full` battery stays `Full` even when its energy files are
    /// unreadable; the charge is then reported as `1.0`.
    pub fn update_status(&mut self) -> Result<BatteryReading> {
        let state = BatteryState::from_status(&self.get_param(Attribute::Status)?);

        let percent = match self.read_percent() {
            Ok(percent) => percent,
            Err(e) if state == BatteryState::Full => {
                warn!("Battery {} is full but energy is unreadable: {e}", self.battery);
                1.0
            }
            Err(e) => return Err(e),
        };

        Ok(BatteryReading { state, percent })
    }

    fn read_percent(&mut self) -> Result<f64> {
        let now = parse_energy(Attribute::EnergyNow, self.get_param(Attribute::EnergyNow)?)?;
        let full = parse_energy(Attribute::EnergyFull, self.get_param(Attribute::EnergyFull)?)?;

        if full == 0.0 {
            return Ok(0.0);
        }
        Ok((now / full).clamp(0.0, 1.0))
    }

    fn load(&self, name: &str) -> Result<Option<String>> {
        self.read_file(name).map_err(|source| PanelError::Unreadable {
            path: self.base.join(&self.battery).join(name),
            source,
        })
    }
}

impl Sensor for BatteryTelemetryResolver {
    type Reading = BatteryReading;

    fn sense(&mut self) -> Result<BatteryReading> {
        self.update_status()
    }
}

fn parse_energy(attribute: Attribute, raw: String) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PanelError::Parse {
            attribute: attribute.key(),
            value: raw,
        }),
    }
}

/// First `BAT*` entry of `base` in name order, or `BAT0`.
fn find_battery(base: &Path) -> String {
    let Ok(entries) = std::fs::read_dir(base) else {
        return FALLBACK_BATTERY.to_string();
    };

    entries
        .flatten()
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.starts_with(BATTERY_PREFIX))
        .min()
        .unwrap_or_else(|| FALLBACK_BATTERY.to_string())
}
