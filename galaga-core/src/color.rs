use core::fmt;
use core::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ColorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const DEFAULT_THEME: Rgb = Rgb::new(0, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn parse_hex(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(found) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit { found });
        }

        let nibble = |byte: u8| -> u8 {
            match byte {
                b'0'..=b'9' => byte - b'0',
                b'a'..=b'f' => byte - b'a' + 10,
                _ => byte - b'A' + 10,
            }
        };
        let bytes = digits.as_bytes();
        match bytes.len() {
            6 => Ok(Self::new(
                (nibble(bytes[0]) << 4) | nibble(bytes[1]),
                (nibble(bytes[2]) << 4) | nibble(bytes[3]),
                (nibble(bytes[4]) << 4) | nibble(bytes[5]),
            )),
            3 => Ok(Self::new(
                nibble(bytes[0]) * 0x11,
                nibble(bytes[1]) * 0x11,
                nibble(bytes[2]) * 0x11,
            )),
            len => Err(ColorError::InvalidLength { len }),
        }
    }

    /// Falls back to the default theme green on malformed input.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse_hex(input).unwrap_or(Self::DEFAULT_THEME)
    }

    pub fn inverse(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Adds `delta` to every channel, saturating at 0 and 255.
    pub fn adjust(self, delta: i16) -> Self {
        let shift = |channel: u8| (i16::from(channel) + delta).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::DEFAULT_THEME
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

/// Serialized as `#rrggbb` so display lists stay readable to canvas hosts.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_THEME_COLOR;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::parse_hex("#00ff00"), Ok(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::parse_hex("FF8800"), Ok(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::parse_hex("#abc"), Ok(Rgb::new(0xaa, 0xbb, 0xcc)));
        assert_eq!(Rgb::parse_hex("  #0a0B0c "), Ok(Rgb::new(10, 11, 12)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Rgb::parse_hex(""), Err(ColorError::Empty));
        assert_eq!(Rgb::parse_hex("#"), Err(ColorError::Empty));
        assert_eq!(
            Rgb::parse_hex("#12345"),
            Err(ColorError::InvalidLength { len: 5 })
        );
        assert_eq!(
            Rgb::parse_hex("#gg0000"),
            Err(ColorError::InvalidDigit { found: 'g' })
        );
        assert_eq!(
            Rgb::parse_hex("#ffé"),
            Err(ColorError::InvalidDigit { found: 'é' })
        );
    }

    #[test]
    fn default_matches_textual_constant() {
        assert_eq!(Rgb::parse_hex(DEFAULT_THEME_COLOR), Ok(Rgb::DEFAULT_THEME));
        assert_eq!(Rgb::parse_or_default("not a color"), Rgb::DEFAULT_THEME);
    }

    #[test]
    fn inverse_and_adjust_saturate() {
        let theme = Rgb::new(0, 255, 16);
        assert_eq!(theme.inverse(), Rgb::new(255, 0, 239));
        assert_eq!(theme.adjust(-30), Rgb::new(0, 225, 0));
        assert_eq!(theme.adjust(30), Rgb::new(30, 255, 46));
    }

    #[test]
    fn hex_round_trip_formatting() {
        let color = Rgb::new(1, 171, 255);
        assert_eq!(color.to_hex(), "#01abff");
        assert_eq!(color.to_string(), "#01abff");
    }
}
