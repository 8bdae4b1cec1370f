pub mod colors;

pub use colors::Color;

use nerdbar_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Calling [`Theme::from_config`] is infallible — invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub foreground: Color,
    /// Used for `Error: …` blocks.
    pub accent:     Color,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::GREY),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::ROSE),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig {
            foreground: "not a color".into(),
            accent:     "#00ff00".into(),
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.foreground, Color::GREY);
        assert_eq!(theme.accent.to_hex(), "#00ff00");
    }
}
