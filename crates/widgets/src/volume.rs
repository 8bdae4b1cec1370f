use nerdbar_config::{poll_interval, VolumeConfig};
use nerdbar_core::{Block, PanelWidget, Sensor, VolumeReading};
use nerdbar_system::{SystemRunner, VolumeSensor};
use nerdbar_theme::Theme;
use std::path::PathBuf;
use std::time::Duration;

use crate::error_block;

pub const ID: &str = "volume";

/// Discrete volume level, one image per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Off,
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    pub fn from_reading(reading: &VolumeReading) -> Self {
        match reading.volume {
            _ if reading.muted => Self::Off,
            None | Some(0) => Self::Off,
            Some(v) if v <= 30 => Self::Low,
            Some(v) if v < 80 => Self::Medium,
            Some(_) => Self::High,
        }
    }

    /// Base name of the level's image in the theme directory.
    pub fn image_name(self) -> &'static str {
        match self {
            Self::Off => "volume_off",
            Self::Low => "volume_low",
            Self::Medium => "volume_medium",
            Self::High => "volume_high",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Off => "\u{f075f}",
            Self::Low => "\u{f057f}",
            Self::Medium => "\u{f0580}",
            Self::High => "\u{f057e}",
        }
    }
}

/// Displays the default sink volume as a glyph or themed image.
#[derive(Debug)]
pub struct VolumeWidget<S = VolumeSensor<SystemRunner>> {
    sensor:     S,
    interval:   Duration,
    theme_path: Option<PathBuf>,
    theme:      Theme,
}

impl VolumeWidget {
    pub fn from_config(cfg: &VolumeConfig, theme: &Theme) -> Self {
        Self::new(VolumeSensor::new(SystemRunner, cfg.mixer.clone()), cfg, theme)
    }
}

impl<S> VolumeWidget<S>
where
    S: Sensor<Reading = VolumeReading> + std::fmt::Debug,
{
    pub fn new(sensor: S, cfg: &VolumeConfig, theme: &Theme) -> Self {
        Self {
            sensor,
            interval:   poll_interval(cfg.update_interval),
            theme_path: cfg.theme_path.clone(),
            theme:      theme.clone(),
        }
    }

    pub fn build(&self, reading: &VolumeReading) -> Block {
        let level = VolumeLevel::from_reading(reading);
        let block = Block::new(ID, level.glyph()).with_color(self.theme.foreground.to_hex());

        match &self.theme_path {
            Some(dir) => {
                let image = dir.join(format!("{}.png", level.image_name()));
                block.with_icon(image.display().to_string())
            }
            None => block,
        }
    }
}

impl<S> PanelWidget for VolumeWidget<S>
where
    S: Sensor<Reading = VolumeReading> + std::fmt::Debug,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Scripted;

    fn level(volume: u32) -> VolumeLevel {
        VolumeLevel::from_reading(&VolumeReading { muted: false, volume: Some(volume) })
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(level(0), VolumeLevel::Off);
        assert_eq!(level(1), VolumeLevel::Low);
        assert_eq!(level(30), VolumeLevel::Low);
        assert_eq!(level(31), VolumeLevel::Medium);
        assert_eq!(level(79), VolumeLevel::Medium);
        assert_eq!(level(80), VolumeLevel::High);
        assert_eq!(level(150), VolumeLevel::High);
    }

    #[test]
    fn muted_is_off() {
        let muted = VolumeReading { muted: true, volume: None };
        assert_eq!(VolumeLevel::from_reading(&muted), VolumeLevel::Off);
    }

    #[test]
    fn theme_path_adds_image() {
        let cfg = VolumeConfig {
            theme_path: Some(PathBuf::from("/themes/volume")),
            ..Default::default()
        };
        let sensor = Scripted::new(vec![Ok(VolumeReading { muted: false, volume: Some(55) })]);
        let mut w = VolumeWidget::new(sensor, &cfg, &Theme::default());

        let block = w.poll();
        assert_eq!(block.full_text, VolumeLevel::Medium.glyph());
        assert_eq!(block.icon.as_deref(), Some("/themes/volume/volume_medium.png"));
    }

    #[test]
    fn no_theme_path_no_image() {
        let sensor = Scripted::new(vec![Ok(VolumeReading::default())]);
        let mut w = VolumeWidget::new(sensor, &VolumeConfig::default(), &Theme::default());
        let block = w.poll();
        assert_eq!(block.icon, None);
        assert_eq!(block.full_text, VolumeLevel::Off.glyph());
    }
}
