/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const GREY:  Self = Self { r: 0.671, g: 0.698, b: 0.749, a: 1.0 }; // #abb2bf
    pub const RED:   Self = Self { r: 1.0,   g: 0.0,   b: 0.0,   a: 1.0 }; // #ff0000
    pub const ROSE:  Self = Self { r: 0.878, g: 0.424, b: 0.459, a: 1.0 }; // #e06c75

    /// Parse a hex color string (`RRGGBB` or `RRGGBBAA`, leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16).ok().map(|b| b as f32 / 255.0)
        };

        match hex.len() {
            6 => Some(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: 1.0 }),
            8 => Some(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: channel(6)? }),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, the form status-line consumers expect.  Alpha is dropped.
    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Color::from_hex("FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("zzzzzz"), None);
        assert_eq!(Color::from_hex("ééé"), None);
    }

    #[test]
    fn hex_round_trip_of_config_default() {
        assert_eq!(Color::from_hex("#abb2bf").unwrap().to_hex(), "#abb2bf");
    }
}
