use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when parsing a color such as `#ff6d00`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRgbError {
    /// Neither 3 nor 6 hex digits
    #[error("expected 3 or 6 hex digits, got {0}")]
    BadLength(usize),
    /// Non-hex character
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

/// Sticker color, written as `#rrggbb` in preferences.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    /// sRGB component values.
    pub rgb: [u8; 3],
}
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        f.write_str(&hex::encode(self.rgb))
    }
}
impl FromStr for Rgb {
    type Err = ParseRgbError;

    /// Accepts `#rrggbb` and the CSS short form `#rgb`, with or without `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let expanded;
        let digits = match digits.len() {
            6 => digits,
            3 => {
                expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
                &expanded
            }
            n => return Err(ParseRgbError::BadLength(n)),
        };
        let mut rgb = [0; 3];
        hex::decode_to_slice(digits, &mut rgb)?;
        Ok(Self { rgb })
    }
}
impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
impl Rgb {
    /// Constructs a color from a `0xRRGGBB` literal.
    pub const fn from_u32(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self { rgb: [r, g, b] }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rgb_strings() {
        let orange = Rgb::from_u32(0xFF6D00);
        assert_eq!("#ff6d00", orange.to_string());
        assert_eq!(Ok(orange), "#FF6D00".parse());
        assert_eq!(Ok(orange), " ff6d00 ".parse());
        assert_eq!(Ok(Rgb::from_u32(0xFF0000)), "#f00".parse());
        assert_eq!(Err(ParseRgbError::BadLength(5)), "#12345".parse::<Rgb>());
        assert!(matches!("#gg0000".parse::<Rgb>(), Err(ParseRgbError::Hex(_))));
    }

    #[test]
    fn test_rgb_serde() {
        let color = Rgb::from_u32(0x00B5D8);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!("\"#00b5d8\"", json);
        assert_eq!(color, serde_json::from_str::<Rgb>(&json).unwrap());
        assert!(serde_json::from_str::<Rgb>("\"#00b5\"").is_err());
    }
}
