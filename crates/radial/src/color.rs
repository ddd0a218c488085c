use palette::{Srgb, Srgba};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Colors handed out to newly added items, indexed by `(len + 3) % 6`.
pub const NEW_ITEM_PALETTE: [HexColor; 6] = [
    HexColor::new(0x6d, 0xcf, 0xf6),
    HexColor::new(0x7d, 0x7a, 0xff),
    HexColor::new(0xff, 0x9f, 0x43),
    HexColor::new(0x00, 0xd1, 0xb2),
    HexColor::new(0xff, 0x5d, 0x8f),
    HexColor::new(0xff, 0xcd, 0x3c),
];

pub const WHITE: HexColor = HexColor::new(0xff, 0xff, 0xff);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("'{0}' is not a hex color (expected #rgb or #rrggbb)")]
    InvalidHex(String),
}

/// An opaque sRGB color that round-trips through `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn palette_entry(index: usize) -> Self {
        NEW_ITEM_PALETTE[index % NEW_ITEM_PALETTE.len()]
    }

    /// Lightens (`luminosity > 0`) or darkens (`< 0`) every channel by a flat
    /// percentage of itself. This is not a perceptual operation: the menu host
    /// shades exactly this way and the preview has to agree with it.
    pub fn shade(self, luminosity: f64) -> Self {
        let adjust = |channel: u8| {
            let c = f64::from(channel);
            (c + c * luminosity).clamp(0.0, 255.0).round() as u8
        };
        Self::new(adjust(self.red), adjust(self.green), adjust(self.blue))
    }

    pub fn to_srgb(self) -> Srgb<f64> {
        Srgb::new(self.red, self.green, self.blue).into_format()
    }

    pub fn with_alpha(self, alpha: f64) -> Srgba<f64> {
        let (r, g, b) = self.to_srgb().into_components();
        Srgba::new(r, g, b, alpha)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    /// Accepts anything whose hex digits form a 3- or 6-digit color, so
    /// `#1b1d26`, `1b1d26` and `#fff` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(char::is_ascii_hexdigit).collect();
        if !matches!(digits.len(), 3 | 6) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        let rgb: Srgb<u8> = digits
            .parse()
            .map_err(|_| ColorError::InvalidHex(s.to_string()))?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue))
    }
}

impl From<HexColor> for Srgb<f64> {
    fn from(color: HexColor) -> Self {
        color.to_srgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let cases = vec![
            ("#1b1d26", HexColor::new(0x1b, 0x1d, 0x26)),
            ("1B1D26", HexColor::new(0x1b, 0x1d, 0x26)),
            ("#fff", HexColor::new(0xff, 0xff, 0xff)),
            ("#6dcff6", NEW_ITEM_PALETTE[0]),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<HexColor>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("#12".parse::<HexColor>().is_err());
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_display_is_lowercase_padded() {
        assert_eq!(HexColor::new(0, 0x0a, 0xff).to_string(), "#000aff");
    }

    #[test]
    fn test_shade_percentage() {
        let base = HexColor::new(100, 200, 0);
        assert_eq!(base.shade(0.1), HexColor::new(110, 220, 0));
        assert_eq!(base.shade(-0.1), HexColor::new(90, 180, 0));
    }

    #[test]
    fn test_shade_clamps_and_rounds() {
        let base = HexColor::new(250, 5, 128);
        // 250 * 1.1 = 275 -> 255, 5 * 1.1 = 5.5 -> 6, 128 * 1.1 = 140.8 -> 141
        assert_eq!(base.shade(0.1), HexColor::new(255, 6, 141));
        assert_eq!(base.shade(-1.0), HexColor::new(0, 0, 0));
    }

    #[test]
    fn test_shade_is_not_an_exact_inverse() {
        let base = HexColor::new(250, 10, 77);
        let round_trip = base.shade(0.1).shade(-0.1);
        assert_ne!(round_trip, base);
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&HexColor::new(0xff, 0x9f, 0x43)).unwrap();
        assert_eq!(json, "\"#ff9f43\"");
        let back: HexColor = serde_json::from_str("\"#7d7aff\"").unwrap();
        assert_eq!(back, NEW_ITEM_PALETTE[1]);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(HexColor::palette_entry(3), NEW_ITEM_PALETTE[3]);
        assert_eq!(HexColor::palette_entry(9), NEW_ITEM_PALETTE[3]);
    }
}
