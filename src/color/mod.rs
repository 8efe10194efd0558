//! Color representation and color theory
//!
//! This module handles conversions between RGB, hex and HSL, and the
//! derived colors and contrast checks built on top of them.

pub mod codec;
pub mod theory;

pub use codec::{ColorCodec, ColorSample, HslColor, Pixel};
pub use theory::{ColorTheory, ContrastResult, TheorySuggestions};
