//! Color theory and accessibility helpers
//!
//! Hue rotations (complementary, analogous) keep lightness and saturation
//! and only move around the HSL wheel. Contrast follows the WCAG 2.x
//! relative luminance definition.

use serde::Serialize;

use crate::color::codec::{normalize_turns, ColorCodec, ColorSample, Pixel};
use crate::constants::theory::{
    ANALOGOUS_ROTATION, COMPLEMENTARY_ROTATION, LABEL_CHANNEL_SUM_THRESHOLD,
    SRGB_LINEAR_THRESHOLD, WCAG_AA_NORMAL,
};

/// Contrast ratio between two colors with its AA verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastResult {
    /// `(L_high + 0.05) / (L_low + 0.05)`, always >= 1.0
    pub ratio: f64,
    /// Whether `ratio` meets the 4.5:1 threshold for normal text
    pub passes_aa: bool,
}

/// Theory colors derived from one base color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TheorySuggestions {
    pub base: ColorSample,
    pub complementary: ColorSample,
    pub analogous: (ColorSample, ColorSample),
}

/// Stateless color theory operations
pub struct ColorTheory;

impl ColorTheory {
    /// Opposite hue (half a turn), same lightness and saturation
    pub fn complementary(color: &ColorSample) -> ColorSample {
        Self::rotate_hue(color, COMPLEMENTARY_ROTATION)
    }

    /// Neighbouring hues roughly 30 degrees either side
    ///
    /// Returns `(hue + 0.083, hue - 0.083)`.
    pub fn analogous(color: &ColorSample) -> (ColorSample, ColorSample) {
        (
            Self::rotate_hue(color, ANALOGOUS_ROTATION),
            Self::rotate_hue(color, -ANALOGOUS_ROTATION),
        )
    }

    /// Complementary and analogous colors for `color` in one bundle
    pub fn suggestions(color: &ColorSample) -> TheorySuggestions {
        TheorySuggestions {
            base: color.clone(),
            complementary: Self::complementary(color),
            analogous: Self::analogous(color),
        }
    }

    /// WCAG relative luminance in `[0, 1]`
    pub fn relative_luminance(color: &ColorSample) -> f64 {
        let [r, g, b] = color.rgb().channels().map(|c| linearize(f64::from(c) / 255.0));
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG contrast ratio; argument order does not matter
    pub fn contrast_ratio(a: &ColorSample, b: &ColorSample) -> ContrastResult {
        let la = Self::relative_luminance(a);
        let lb = Self::relative_luminance(b);
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };

        let ratio = (lighter + 0.05) / (darker + 0.05);
        ContrastResult {
            ratio,
            passes_aa: ratio >= WCAG_AA_NORMAL,
        }
    }

    /// Caption color for text drawn on top of `background`
    ///
    /// White on dark swatches (channel sum below 384), black otherwise.
    pub fn label_color(background: &ColorSample) -> ColorSample {
        if background.rgb().channel_sum() < LABEL_CHANNEL_SUM_THRESHOLD {
            ColorSample::new(Pixel::WHITE)
        } else {
            ColorSample::new(Pixel::BLACK)
        }
    }

    fn rotate_hue(color: &ColorSample, turns: f64) -> ColorSample {
        let hsl = color.hsl();
        let hue = normalize_turns(hsl.hue + turns);
        ColorSample::new(ColorCodec::from_hsl(hue, hsl.lightness, hsl.saturation))
    }
}

fn linearize(channel: f64) -> f64 {
    if channel <= SRGB_LINEAR_THRESHOLD {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}
