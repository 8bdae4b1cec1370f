use nerdbar_config::{poll_interval, KeyboardConfig};
use nerdbar_core::{Block, PanelWidget, Sensor};
use nerdbar_system::{KeyboardLayoutSensor, SystemRunner};
use nerdbar_theme::Theme;
use std::time::Duration;

use crate::error_block;

pub const ID: &str = "keyboard";

/// Displays the current keyboard layout code, upper-cased (`US`, `DE`, ...).
#[derive(Debug)]
pub struct KeyboardWidget<S = KeyboardLayoutSensor<SystemRunner>> {
    sensor:   S,
    interval: Duration,
    theme:    Theme,
}

impl KeyboardWidget {
    pub fn from_config(cfg: &KeyboardConfig, theme: &Theme) -> Self {
        let sensor = KeyboardLayoutSensor::new(SystemRunner, cfg.command.clone());
        Self::new(sensor, cfg, theme)
    }
}

impl<S> KeyboardWidget<S>
where
    S: Sensor<Reading = String> + std::fmt::Debug,
{
    pub fn new(sensor: S, cfg: &KeyboardConfig, theme: &Theme) -> Self {
        Self {
            sensor,
            interval: poll_interval(cfg.update_interval),
            theme:    theme.clone(),
        }
    }
}

impl<S> PanelWidget for KeyboardWidget<S>
where
    S: Sensor<Reading = String> + std::fmt::Debug,
{
    fn id(&self) -> &str {
        ID
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> Block {
        let layout = match self.sensor.sense() {
            Ok(layout) if layout.is_empty() => "??".to_string(),
            Ok(layout) => layout.to_uppercase(),
            Err(e) => return error_block(ID, &e, &self.theme),
        };
        Block::new(ID, layout).with_color(self.theme.foreground.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Scripted;

    #[test]
    fn layout_is_upper_cased() {
        let sensor = Scripted::new(vec![Ok("us".to_string()), Ok(String::new())]);
        let mut w = KeyboardWidget::new(sensor, &KeyboardConfig::default(), &Theme::default());
        assert_eq!(w.poll().full_text, "US");
        assert_eq!(w.poll().full_text, "??");
    }
}
