use nerdbar_config::{poll_interval, NetworkConfig};
use nerdbar_core::{Block, NetworkReading, PanelWidget, Sensor};
use nerdbar_system::NetworkSensor;
use nerdbar_theme::Theme;
use std::time::Duration;

use crate::{error_block, threshold_glyph};

pub const ID: &str = "network";

const WIRED: &str = "\u{f0200}";
const DISCONNECTED: &str = "\u{f092e}";

/// Signal glyphs by inclusive upper bound of the strength fraction.
const SIGNAL: [(f64, &str); 4] = [
    (0.2, "\u{f092f}"),
    (0.4, "\u{f091f}"),
    (0.6, "\u{f0922}"),
    (0.8, "\u{f0925}"),
];
const SIGNAL_TOP: &str = "\u{f0928}";

/// Shows a wired link, Wi-Fi signal strength, or disconnection.
#[derive(Debug)]
pub struct NetworkWidget<S = NetworkSensor> {
    sensor:      S,
    interval:    Duration,
    max_quality: f32,
    theme:       Theme,
}

impl NetworkWidget {
    pub fn from_config(cfg: &NetworkConfig, theme: &Theme) -> Self {
        let sensor = NetworkSensor {
            interface:     cfg.interface.clone(),
            wired_prefix:  cfg.wired_prefix.clone(),
            net_dir:       cfg.net_dir.clone(),
            wireless_file: cfg.wireless_file.clone(),
        };
        Self::new(sensor, cfg, theme)
    }
}

impl<S> NetworkWidget<S>
where
    S: Sensor<Reading = NetworkReading> + std::fmt::Debug,
{
    pub fn new(sensor: S, cfg: &NetworkConfig, theme: &Theme) -> Self {
        Self {
            sensor,
            interval:    poll_interval(cfg.update_interval),
            max_quality: cfg.max_quality,
            theme:       theme.clone(),
        }
    }

    /// Signal strength in `[0, 1]` for a raw link quality.
    pub fn strength(&self, quality: f32) -> f32 {
        (quality / self.max_quality).clamp(0.0, 1.0)
    }

    pub fn build(&self, reading: &NetworkReading) -> Block {
        let glyph = match *reading {
            NetworkReading::Wired { .. } => WIRED,
            NetworkReading::Disconnected => DISCONNECTED,
            NetworkReading::Wireless { quality } => {
                threshold_glyph(&SIGNAL, SIGNAL_TOP, f64::from(self.strength(quality)))
            }
        };
        Block::new(ID, glyph).with_color(self.theme.foreground.to_hex())
    }
}

impl<S> PanelWidget for NetworkWidget<S>
where
    S: Sensor<Reading = NetworkReading> + std::fmt::Debug,
{
    fn id(&self) -> &str {
        ID
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn poll(&mut self) -> Block {
        match self.sensor.sense() {
            Ok(reading) => self.build(&reading),
            Err(e) => error_block(ID, &e, &self.theme),
        }
    }
}
