//! # Palette Extract
//!
//! A Rust crate for extracting dominant color palettes from images.
//!
//! This library provides:
//! - Dominant color extraction via seeded k-means on a downsampled image
//! - Palette ordering by frequency, hue, lightness or saturation
//! - Complementary and analogous color suggestions
//! - WCAG relative luminance and contrast checks
//! - Text exports (CSS variables, hex lists, JSON records)
//!
//! All operations are synchronous and free of shared state; every call with
//! the same image, color count and seed produces the same palette.
//!
//! ## Example
//!
//! ```rust,no_run
//! use palette_extract::{analyze_image, ColorTheory, PaletteConfig};
//! use std::path::Path;
//!
//! let palette = analyze_image(Path::new("photo.jpg"), &PaletteConfig::default())?;
//! for entry in &palette {
//!     let comp = ColorTheory::complementary(&entry.color);
//!     println!("{} {:.1}% (complement {})", entry.hex(), entry.weight, comp);
//! }
//! # Ok::<(), palette_extract::PaletteError>(())
//! ```

use std::path::Path;

pub mod assembler;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod extraction;
pub mod history;
pub mod image_loader;

pub use assembler::{Palette, PaletteAssembler, PaletteEntry, Role, SortKey};
pub use color::{ColorCodec, ColorSample, ColorTheory, ContrastResult, HslColor, Pixel};
pub use config::{ExtractionConfig, PaletteConfig};
pub use error::{PaletteError, Result};
pub use extraction::{Cluster, ClusterExtractor};
pub use history::{HistoryRecord, PaletteHistory};

/// Extract a palette from an image file
///
/// Loads the file, then builds a palette with the color count, sort key,
/// seed and clustering settings from `config`.
///
/// # Errors
///
/// Returns `PaletteError` if:
/// - The configuration is invalid
/// - The image cannot be loaded or has an unknown extension
/// - The image has no pixels
pub fn analyze_image(image_path: &Path, config: &PaletteConfig) -> Result<Palette> {
    config.validate()?;
    let image = image_loader::load_image(image_path)?;
    PaletteAssembler::build_with(&image, config)
}
