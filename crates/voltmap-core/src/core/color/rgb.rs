use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents errors that can occur when parsing a color from hex notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not of the form `#RRGGBB`.
    #[error("Color '{0}' is not in '#RRGGBB' hex notation")]
    Format(String),
    /// The string has the right shape but contains a non-hex digit.
    #[error("Invalid hex digit in color '{0}'")]
    HexDigit(String),
}

/// A color in normalized RGB space, each component in `[0, 1]`.
///
/// This is the unit of the gradient arithmetic and of the final per-point
/// annotation. Anchor colors enter the pipeline in `#RRGGBB` hex notation, so
/// the effective resolution of the color space is 8 bits per channel; see
/// [`Rgb::quantized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolates toward `other`.
    ///
    /// `mix = 0` yields `self`, `mix = 1` yields `other`; interpolation stays
    /// within the convex hull of the two anchors, so no clamping beyond
    /// `[0, 1]` is needed for valid inputs.
    pub fn fade(&self, other: &Rgb, mix: f64) -> Rgb {
        Rgb::new(
            (1.0 - mix) * self.r + mix * other.r,
            (1.0 - mix) * self.g + mix * other.g,
            (1.0 - mix) * self.b + mix * other.b,
        )
    }

    /// Snaps each component to the nearest 8-bit level.
    ///
    /// Interpolated colors are quantized to the resolution of the `#RRGGBB`
    /// anchor notation so that a color and its hex rendering always denote the
    /// same value.
    pub fn quantized(&self) -> Rgb {
        let [r, g, b] = self.to_bytes();
        Rgb::from_bytes([r, g, b])
    }

    /// Formats the color in `#RRGGBB` hex notation.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    fn to_bytes(&self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

fn to_byte(component: f64) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::Format(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError::Format(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::HexDigit(s.to_string()))
        };
        Ok(Rgb::from_bytes([
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
        ]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
