use crate::{error::Result, state::Block};
use std::time::Duration;

/// A blocking data source polled by a widget.
///
/// Implementations read sysfs files or run helper processes; they are always
/// called from a blocking-friendly thread, never from the async executor.
pub trait Sensor: Send + 'static {
    type Reading;

    fn sense(&mut self) -> Result<Self::Reading>;
}

/// Every built-in widget must implement this trait.
///
/// A widget owns its sensor and turns each reading into a [`Block`].
/// Polls of one widget never overlap; the host moves the widget onto a
/// blocking thread for the duration of `poll`.
pub trait PanelWidget: Send + std::fmt::Debug + 'static {
    /// Unique string identifier, e.g. `"battery"` or `"volume"`.
    fn id(&self) -> &str;

    /// Time between two polls.
    fn interval(&self) -> Duration;

    /// Read the sensor and render.  Sensor failures are rendered, not returned.
    fn poll(&mut self) -> Block;
}
