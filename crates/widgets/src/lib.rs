pub mod battery;
pub mod keyboard;
pub mod network;
pub mod volume;

pub use battery::BatteryWidget;
pub use keyboard::KeyboardWidget;
pub use network::NetworkWidget;
pub use volume::VolumeWidget;

use nerdbar_config::PanelConfig;
use nerdbar_core::{Block, PanelError, PanelWidget};
use nerdbar_theme::Theme;

/// Construct the widget named `kind` from its config section.
///
/// Returns `None` for unknown kinds; validated configs never contain any.
pub fn build(kind: &str, config: &PanelConfig, theme: &Theme) -> Option<Box<dyn PanelWidget>> {
    let widget: Box<dyn PanelWidget> = match kind {
        battery::ID  => Box::new(BatteryWidget::from_config(&config.battery, theme)),
        network::ID  => Box::new(NetworkWidget::from_config(&config.network, theme)),
        keyboard::ID => Box::new(KeyboardWidget::from_config(&config.keyboard, theme)),
        volume::ID   => Box::new(VolumeWidget::from_config(&config.volume, theme)),
        _ => return None,
    };
    Some(widget)
}

/// Block shown in place of a widget whose sensor failed.
pub(crate) fn error_block(id: &str, err: &PanelError, theme: &Theme) -> Block {
    tracing::debug!("{id}: {err}");
    Block::new(id, format!("Error: {err}")).with_color(theme.accent.to_hex())
}

/// First glyph whose inclusive upper bound holds `value`, else `top`.
pub(crate) fn threshold_glyph(
    table: &[(f64, &'static str)],
    top: &'static str,
    value: f64,
) -> &'static str {
    table
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map_or(top, |(_, glyph)| *glyph)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_layout_kind() {
        let config = PanelConfig::default();
        let theme = Theme::default();
        for kind in nerdbar_config::WIDGET_KINDS {
            let widget = build(kind, &config, &theme).unwrap();
            assert_eq!(widget.id(), kind);
        }
        assert!(build("clock", &config, &theme).is_none());
    }

    #[test]
    fn out_of_range_intervals_are_clamped_not_fatal() {
        let mut config = PanelConfig::default();
        config.battery.update_interval = 1e30;
        config.volume.update_interval = 1e-12;
        let theme = Theme::default();

        let battery = build("battery", &config, &theme).unwrap();
        assert_eq!(battery.interval(), nerdbar_config::MAX_INTERVAL);

        let volume = build("volume", &config, &theme).unwrap();
        assert!(!volume.interval().is_zero());
        assert_eq!(volume.interval(), nerdbar_config::MIN_INTERVAL);
    }

    #[test]
    fn failed_poll_message_lands_in_the_status_line() {
        let theme = Theme::default();
        let err = PanelError::System("pamixer not found".into());
        let block = error_block("volume", &err, &theme);

        assert_eq!(block.name, "volume");
        assert_eq!(block.full_text, "Error: system error: pamixer not found");
        assert_eq!(block.color, Some(theme.accent.to_hex()));
    }

    #[test]
    fn threshold_glyph_falls_through_to_top() {
        let table = [(0.5, "low")];
        assert_eq!(threshold_glyph(&table, "high", 0.5), "low");
        assert_eq!(threshold_glyph(&table, "high", 0.51), "high");
        assert_eq!(threshold_glyph(&table, "high", f64::NAN), "high");
    }
}
