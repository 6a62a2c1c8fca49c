//! Color math for brand palette matching.
//!
//! All comparisons happen in plain 8-bit RGB channel space. Malformed
//! palette tokens are a configuration defect, caught when rules load.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color token {0:?}: expected 6 hex digits")]
    InvalidToken(String),

    #[error("Brand palette is empty")]
    EmptyPalette,
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit token, case-insensitive, with or without a
    /// leading `#`.
    pub fn parse(token: &str) -> Result<Self, ColorError> {
        let clean = token.strip_prefix('#').unwrap_or(token);
        if clean.len() != 6 || !clean.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidToken(token.to_string()));
        }
        let value = u32::from_str_radix(clean, 16)
            .map_err(|_| ColorError::InvalidToken(token.to_string()))?;
        Ok(Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A palette entry: the configured token together with its parsed value.
/// The token is kept verbatim so reports echo what the config said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColor {
    pub token: String,
    pub rgb: Rgb,
}

impl BrandColor {
    pub fn parse(token: &str) -> Result<Self, ColorError> {
        Ok(Self {
            token: token.to_string(),
            rgb: Rgb::parse(token)?,
        })
    }
}

/// Euclidean distance in RGB channel space. Range [0, ~441.7].
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Nearest palette entry to a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestColor<'a> {
    pub distance: f64,
    pub matched: &'a BrandColor,
}

/// Linear scan over the palette. Strict less-than comparison keeps the
/// first-listed entry on distance ties.
pub fn nearest_brand_color<'a>(
    sample: Rgb,
    palette: &'a [BrandColor],
) -> Result<NearestColor<'a>, ColorError> {
    let mut best: Option<NearestColor<'a>> = None;
    for entry in palette {
        let d = distance(sample, entry.rgb);
        if best.as_ref().map_or(true, |b| d < b.distance) {
            best = Some(NearestColor {
                distance: d,
                matched: entry,
            });
        }
    }
    best.ok_or(ColorError::EmptyPalette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_prefix() {
        assert_eq!(Rgb::parse("#FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::parse("00ff00").unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::parse("#0000Ff").unwrap(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for bad in ["", "#fff", "ff00", "#ff00000", "red", "#12345g"] {
            assert!(matches!(
                Rgb::parse(bad),
                Err(ColorError::InvalidToken(_))
            ));
        }
    }

    #[test]
    fn test_distance_zero_for_identical() {
        let c = Rgb::new(17, 99, 203);
        assert_eq!(distance(c, c), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_distance_full_range() {
        let d = distance(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255));
        assert!((d - 441.672_955).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_returns_palette_member() {
        let palette = vec![
            BrandColor::parse("#FF0000").unwrap(),
            BrandColor::parse("#00FF00").unwrap(),
        ];
        let nearest = nearest_brand_color(Rgb::new(10, 250, 10), &palette).unwrap();
        assert_eq!(nearest.matched.token, "#00FF00");
        assert!(nearest.distance >= 0.0 && nearest.distance <= 441.7);
    }

    #[test]
    fn test_nearest_first_listed_wins_ties() {
        // Both entries sit exactly 10 away from the sample.
        let palette = vec![
            BrandColor::parse("#000000").unwrap(),
            BrandColor::parse("#140000").unwrap(),
        ];
        let nearest = nearest_brand_color(Rgb::new(10, 0, 0), &palette).unwrap();
        assert_eq!(nearest.matched.token, "#000000");
        assert_eq!(nearest.distance, 10.0);
    }

    #[test]
    fn test_nearest_empty_palette_is_error() {
        let result = nearest_brand_color(Rgb::new(0, 0, 0), &[]);
        assert!(matches!(result, Err(ColorError::EmptyPalette)));
    }
}
