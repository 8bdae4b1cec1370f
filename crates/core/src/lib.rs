pub mod error;
pub mod event;
pub mod state;
pub mod widget;

pub use error::{PanelError, Result};
pub use event::Message;
pub use state::{BatteryReading, BatteryState, Block, NetworkReading, VolumeReading};
pub use widget::{PanelWidget, Sensor};
