use std::fmt;

use serde::{Serialize, Serializer};

/// 32-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    pub const fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#RGB`, `#RRGGBB`, `#AARRGGBB` (the `#` is optional) or one of
    /// `black`, `white`, `transparent`. Anything else is `None`.
    pub fn parse(input: &str) -> Option<Color> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "black" => return Some(Color::BLACK),
            "white" => return Some(Color::WHITE),
            "transparent" => return Some(Color::TRANSPARENT),
            _ => {}
        }

        let hex = input.strip_prefix('#').unwrap_or(input);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            3 => {
                let r = (value >> 8) & 0xF;
                let g = (value >> 4) & 0xF;
                let b = value & 0xF;
                Some(Color::rgb((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
            }
            6 => Some(Color(0xFF00_0000 | value)),
            8 => Some(Color(value)),
            _ => None,
        }
    }

    /// Relative luminance in `[0, 1]` (sRGB, alpha ignored)
    pub fn luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.040_45 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.red()) + 0.7152 * channel(self.green()) + 0.0722 * channel(self.blue())
    }

    pub fn is_dark(self) -> bool {
        self.luminance() < 0.5
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Color::parse("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::parse("80FF0000"), Some(Color::from_argb(0x80FF_0000)));
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse(" White "), Some(Color::WHITE));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("red"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(Color::BLACK.is_dark());
        assert!(!Color::WHITE.is_dark());
        assert!(Color::rgb(0x1A, 0x23, 0x7E).is_dark());
        assert!(!Color::rgb(0xFF, 0xEB, 0x3B).is_dark());
    }

    #[test]
    fn test_display_is_argb_hex() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_string(), "#FF123456");
    }
}
