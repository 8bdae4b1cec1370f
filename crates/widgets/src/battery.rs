use nerdbar_config::{poll_interval, BatteryConfig};
use nerdbar_core::{BatteryReading, BatteryState, Block, PanelWidget, Sensor};
use nerdbar_system::{BatteryTelemetryResolver, FileOverrides};
use nerdbar_theme::{Color, Theme};
use std::time::Duration;

use crate::{error_block, threshold_glyph};

pub const ID: &str = "battery";

const FULL_GLYPH: &str = "\u{f0079}";

/// Charging glyphs by inclusive upper bound of the charge fraction.
const CHARGING: [(f64, &str); 6] = [
    (0.25, "\u{f0086}"),
    (0.35, "\u{f0087}"),
    (0.55, "\u{f0088}"),
    (0.70, "\u{f0089}"),
    (0.85, "\u{f008a}"),
    (0.95, "\u{f008b}"),
];
const CHARGING_TOP: &str = "\u{f0085}";

const DISCHARGING: [(f64, &str); 10] = [
    (0.05, "\u{f0083}"),
    (0.15, "\u{f007a}"),
    (0.25, "\u{f007b}"),
    (0.35, "\u{f007c}"),
    (0.45, "\u{f007d}"),
    (0.55, "\u{f007e}"),
    (0.65, "\u{f007f}"),
    (0.75, "\u{f0080}"),
    (0.85, "\u{f0081}"),
    (0.95, "\u{f0082}"),
];
const DISCHARGING_TOP: &str = "\u{f0079}";

/// Glyph for a battery reading.
///
/// `Full` short-circuits the charge buckets; `Empty` is drawn like a
/// discharging battery.
pub fn battery_icon(state: BatteryState, percent: f64) -> &'static str {
    match state {
        BatteryState::Full => FULL_GLYPH,
        BatteryState::Charging => threshold_glyph(&CHARGING, CHARGING_TOP, percent),
        BatteryState::Discharging | BatteryState::Empty => {
            threshold_glyph(&DISCHARGING, DISCHARGING_TOP, percent)
        }
    }
}

/// Battery glyph with a low-charge highlight.
#[derive(Debug)]
pub struct BatteryWidget<S = BatteryTelemetryResolver> {
    sensor:         S,
    interval:       Duration,
    low_percentage: f64,
    low_foreground: Color,
    theme:          Theme,
}

impl BatteryWidget {
    /// Widget reading the real sysfs battery described by `cfg`.
    pub fn from_config(cfg: &BatteryConfig, theme: &Theme) -> Self {
        let overrides = FileOverrides {
            status:      cfg.status_file.clone(),
            energy_now:  cfg.energy_now_file.clone(),
            energy_full: cfg.energy_full_file.clone(),
        };
        let battery = cfg.battery.as_ref().map(|id| id.dir_name());
        let resolver = BatteryTelemetryResolver::new(&cfg.base_dir, battery, overrides);

        Self::new(resolver, cfg, theme)
    }
}

impl<S> BatteryWidget<S>
where
    S: Sensor<Reading = BatteryReading> + std::fmt::Debug,
{
    pub fn new(sensor: S, cfg: &BatteryConfig, theme: &Theme) -> Self {
        Self {
            sensor,
            interval:       poll_interval(cfg.update_interval),
            low_percentage: cfg.low_percentage,
            low_foreground: Color::from_hex(&cfg.low_foreground).unwrap_or(Color::RED),
            theme:          theme.clone(),
        }
    }

    pub fn build(&self, reading: &BatteryReading) -> Block {
        let low = reading.state == BatteryState::Discharging && reading.percent < self.low_percentage;
        let color = if low { self.low_foreground } else { self.theme.foreground };

        Block::new(ID, battery_icon(reading.state, reading.percent)).with_color(color.to_hex())
    }
}

impl<S> PanelWidget for BatteryWidget<S>
where
    S: Sensor<Reading = BatteryReading> + std::fmt::Debug,
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
    use nerdbar_core::PanelError;

    fn reading(state: BatteryState, percent: f64) -> BatteryReading {
        BatteryReading { state, percent }
    }

    fn widget(replies: Vec<nerdbar_core::Result<BatteryReading>>) -> BatteryWidget<Scripted<BatteryReading>> {
        BatteryWidget::new(Scripted::new(replies), &BatteryConfig::default(), &Theme::default())
    }

    #[test]
    fn full_ignores_percent() {
        for p in [0.0, 0.3, 1.0] {
            assert_eq!(battery_icon(BatteryState::Full, p), FULL_GLYPH);
        }
    }

    #[test]
    fn charging_bucket_bounds_are_inclusive() {
        assert_eq!(battery_icon(BatteryState::Charging, 0.0), "\u{f0086}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.25), "\u{f0086}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.26), "\u{f0087}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.36), "\u{f0088}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.5), "\u{f0088}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.55), "\u{f0088}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.95), "\u{f008b}");
        assert_eq!(battery_icon(BatteryState::Charging, 0.96), CHARGING_TOP);
    }

    #[test]
    fn discharging_uses_eleven_buckets() {
        let glyphs: std::collections::HashSet<_> = (0..=100)
            .map(|p| battery_icon(BatteryState::Discharging, p as f64 / 100.0))
            .collect();
        assert_eq!(glyphs.len(), 11);

        assert_eq!(battery_icon(BatteryState::Discharging, 0.0), "\u{f0083}");
        assert_eq!(battery_icon(BatteryState::Discharging, 0.05), "\u{f0083}");
        assert_eq!(battery_icon(BatteryState::Discharging, 0.10), "\u{f007a}");
        assert_eq!(battery_icon(BatteryState::Discharging, 0.50), "\u{f007e}");
        assert_eq!(battery_icon(BatteryState::Empty, 0.0), "\u{f0083}");
    }

    #[test]
    fn low_discharging_battery_is_highlighted() {
        let w = widget(Vec::new());
        assert_eq!(w.build(&reading(BatteryState::Discharging, 0.05)).color.as_deref(), Some("#ff0000"));
        assert_eq!(w.build(&reading(BatteryState::Discharging, 0.5)).color.as_deref(), Some("#abb2bf"));
        // Charging never counts as low.
        assert_eq!(w.build(&reading(BatteryState::Charging, 0.05)).color.as_deref(), Some("#abb2bf"));
    }

    #[test]
    fn poll_renders_sensor_failures() {
        let mut w = widget(vec![
            Err(PanelError::AttributeExhausted { attribute: "energy_full_file" }),
            Ok(reading(BatteryState::Full, 1.0)),
        ]);

        let failed = w.poll();
        assert_eq!(failed.full_text, "Error: unable to read status for energy_full_file");

        let ok = w.poll();
        assert_eq!(ok.full_text, FULL_GLYPH);
        assert_eq!(ok.name, "battery");
    }

    #[test]
    fn interval_comes_from_config() {
        assert_eq!(widget(Vec::new()).interval(), Duration::from_secs(60));
    }
}
