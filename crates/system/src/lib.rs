//! Host-independent telemetry: sysfs readers and helper-process sensors.

pub mod battery;
pub mod command;
pub mod keyboard;
pub mod network;
pub mod volume;

pub use battery::{Attribute, BatteryTelemetryResolver, FileOverrides, POWER_SUPPLY_DIR};
pub use command::{CommandRunner, SystemRunner};
pub use keyboard::KeyboardLayoutSensor;
pub use network::NetworkSensor;
pub use volume::VolumeSensor;
