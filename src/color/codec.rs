//! Conversions between RGB, hex strings and HSL
//!
//! - `Pixel` <-> `#rrggbb` (lowercase, zero padded)
//! - `Pixel` <-> HSL with hue in turns (`[0, 1)`) rather than degrees
//!
//! HSL math goes through the `palette` crate; this module only fixes the
//! conventions callers rely on (turns, achromatic hue of zero, truncating
//! back to 8-bit channels).

use std::fmt;
use std::str::FromStr;

use palette::{encoding, FromColor, Hsl, RgbHue, Srgb};
use serde::Serialize;

use crate::{PaletteError, Result};

/// An 8-bit sRGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a pixel from floating point channels in `[0, 255]`.
    ///
    /// Channels are clamped, then truncated toward zero.
    pub fn from_channels_truncated(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels.map(|c| c.clamp(0.0, 255.0) as u8);
        Self::new(r, g, b)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Sum of the three channels, used for quick light/dark decisions
    pub fn channel_sum(&self) -> u32 {
        u32::from(self.r) + u32::from(self.g) + u32::from(self.b)
    }

    /// Whether all three channels are equal (a gray)
    pub fn is_achromatic(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<image::Rgb<u8>> for Pixel {
    fn from(rgb: image::Rgb<u8>) -> Self {
        Self::from(rgb.0)
    }
}

impl FromStr for Pixel {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        ColorCodec::from_hex(s)
    }
}

/// HSL coordinates with every component in `[0, 1]`
///
/// `hue` is measured in turns and stays below 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HslColor {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
}

impl HslColor {
    pub fn new(hue: f64, lightness: f64, saturation: f64) -> Self {
        Self {
            hue,
            lightness,
            saturation,
        }
    }

    /// Hue in degrees for display
    pub fn hue_degrees(&self) -> f64 {
        self.hue * 360.0
    }
}

/// A color with its canonical hex spelling
///
/// The hex string is always derived from `rgb`, so the two never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColorSample {
    rgb: Pixel,
    hex: String,
}

impl ColorSample {
    pub fn new(rgb: Pixel) -> Self {
        Self {
            hex: ColorCodec::to_hex(rgb),
            rgb,
        }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self> {
        ColorCodec::from_hex(hex).map(Self::new)
    }

    pub fn rgb(&self) -> Pixel {
        self.rgb
    }

    /// Lowercase `#rrggbb`
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn hsl(&self) -> HslColor {
        ColorCodec::to_hsl(self.rgb)
    }

    /// CSS functional notation, e.g. `rgb(255, 0, 0)`
    pub fn rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b)
    }
}

impl From<Pixel> for ColorSample {
    fn from(rgb: Pixel) -> Self {
        Self::new(rgb)
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Stateless color representation conversions
pub struct ColorCodec;

impl ColorCodec {
    /// Format a pixel as lowercase `#rrggbb`
    pub fn to_hex(pixel: Pixel) -> String {
        format!("#{:02x}{:02x}{:02x}", pixel.r, pixel.g, pixel.b)
    }

    /// Parse a hex color string
    ///
    /// Accepts an optional leading `#` followed by exactly six hex digits,
    /// in either case.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::InvalidFormat` for any other shape.
    pub fn from_hex(hex: &str) -> Result<Pixel> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(PaletteError::invalid_format(
                hex,
                format!("expected 6 hex digits, got {}", digits.chars().count()),
            ));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::invalid_format(hex, "contains non-hex characters"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| PaletteError::invalid_format(hex, e.to_string()))
        };

        Ok(Pixel::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert to HSL (hue in turns)
    ///
    /// Grays map to hue 0 and saturation 0.
    pub fn to_hsl(pixel: Pixel) -> HslColor {
        let srgb = Srgb::<f64>::new(
            f64::from(pixel.r) / 255.0,
            f64::from(pixel.g) / 255.0,
            f64::from(pixel.b) / 255.0,
        );
        let hsl: Hsl<encoding::Srgb, f64> = Hsl::from_color(srgb);

        if pixel.is_achromatic() {
            return HslColor::new(0.0, hsl.lightness, 0.0);
        }

        HslColor::new(
            normalize_turns(hsl.hue.into_positive_degrees() / 360.0),
            hsl.lightness.clamp(0.0, 1.0),
            hsl.saturation.clamp(0.0, 1.0),
        )
    }

    /// Convert HSL back to an 8-bit pixel
    ///
    /// Channels are scaled by 255 and truncated, mirroring `to_hsl`, so a
    /// round trip moves each channel by at most one step.
    pub fn from_hsl(hue: f64, lightness: f64, saturation: f64) -> Pixel {
        let hsl = Hsl::<encoding::Srgb, f64>::new(
            RgbHue::from_degrees(normalize_turns(hue) * 360.0),
            saturation.clamp(0.0, 1.0),
            lightness.clamp(0.0, 1.0),
        );
        let srgb = Srgb::<f64>::from_color(hsl);

        Pixel::from_channels_truncated([srgb.red * 255.0, srgb.green * 255.0, srgb.blue * 255.0])
    }
}

/// Wrap a hue into `[0, 1)`
pub(crate) fn normalize_turns(turns: f64) -> f64 {
    let wrapped = turns.rem_euclid(1.0);
    // rem_euclid of a tiny negative value rounds up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
