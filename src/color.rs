//! Color primitives: 8-bit RGB, named color pairs and blend targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, Result};

/// Opaque 8-bit sRGB color.
///
/// Serializes as a `#RRGGBB` hex string and parses any CSS color notation
/// (`"white"`, `"#1f77b4"`, `"rgb(31, 119, 180)"`, …).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from `[0, 1]` float components, clamping out-of-gamut values.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(r), q(g), q(b))
    }

    /// Components scaled to `[0, 1]`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance (Rec. 709 weights on the encoded values).
    pub fn luma(self) -> f32 {
        let [r, g, b] = self.to_unit();
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = csscolorparser::parse(s.trim())
            .map_err(|e| ChartError::validation(format!("invalid color '{s}': {e}")))?;
        let [r, g, b, _a] = parsed.to_rgba8();
        Ok(Rgb::new(r, g, b))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

/// The two base colors bound to one category name for the life of a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl ColorPair {
    pub const fn new(primary: Rgb, secondary: Rgb) -> Self {
        Self { primary, secondary }
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.primary, self.secondary)
    }
}

/// Global blend target used to derive a secondary color from each colormap entry.
///
/// The derived color is `(1 - opacity) * base + opacity * color`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            opacity: 0.5,
        }
    }
}

impl Target {
    pub fn new(color: Rgb, opacity: f32) -> Result<Self> {
        let t = Self { color, opacity };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::validation(format!(
                "target opacity must lie in [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_css_names() {
        assert_eq!("#1f77b4".parse::<Rgb>().unwrap(), Rgb::new(31, 119, 180));
        assert_eq!("white".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!("notacolor".parse::<Rgb>().is_err());
    }

    #[test]
    fn hex_round_trip_through_serde() {
        let c = Rgb::new(237, 125, 49);
        let s = serde_json::to_string(&c).unwrap();
        assert_eq!(s, "\"#ED7D31\"");
        let back: Rgb = serde_json::from_str(&s).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn tuples_convert() {
        let c: Rgb = (31, 119, 180).into();
        assert_eq!(c, "#1f77b4".parse().unwrap());
    }

    #[test]
    fn unit_conversion_clamps() {
        assert_eq!(Rgb::from_unit(1.5, -0.2, 0.5), Rgb::new(255, 0, 128));
    }

    #[test]
    fn target_rejects_out_of_range_opacity() {
        assert!(Target::new(Rgb::WHITE, 1.2).is_err());
        assert!(Target::new(Rgb::WHITE, 0.0).is_ok());
        assert_eq!(Target::default().opacity, 0.5);
    }
}
