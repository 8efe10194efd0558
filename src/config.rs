//! Configuration structures for palette extraction.
//!
//! Every tunable parameter of the pipeline lives here, split into the
//! palette request (how many colors, which order, which seed) and the
//! clustering settings.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use palette_extract::PaletteConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PaletteConfig::from_json_file(Path::new("palette.json"))?;
//!
//! // Or use defaults
//! let config = PaletteConfig::default();
//! # Ok::<(), palette_extract::PaletteError>(())
//! ```
//!
//! Missing fields in a JSON file fall back to their defaults, so a file
//! containing only `{ "color_count": 8 }` is valid.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assembler::SortKey;
use crate::constants::{clustering, palette_size};
use crate::{PaletteError, Result};

/// Complete configuration for one palette request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of palette colors (3-10)
    pub color_count: usize,

    /// Display order of the palette
    pub sort_key: SortKey,

    /// Seed for k-means initialization
    pub seed: u64,

    /// Clustering configuration
    pub extraction: ExtractionConfig,
}

/// Clustering parameters.
///
/// Controls the working resolution and the k-means budget. The defaults
/// bound the cost of one extraction regardless of the input image size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Side of the square image clustered (pixels)
    pub working_size: u32,

    /// Resampling filter used to reach the working size
    pub filter: ResizeFilter,

    /// Independent k-means restarts
    pub trials: usize,

    /// Iteration cap per restart
    pub max_iterations: usize,

    /// Convergence threshold on total squared centroid movement
    pub tolerance: f64,
}

/// Resampling filter for the downsample step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            color_count: palette_size::DEFAULT_COLORS,
            sort_key: SortKey::Frequency,
            seed: clustering::DEFAULT_SEED,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            working_size: clustering::WORKING_SIZE,
            filter: ResizeFilter::CatmullRom,
            trials: clustering::TRIALS,
            max_iterations: clustering::MAX_ITERATIONS,
            tolerance: clustering::TOLERANCE,
        }
    }
}

impl PaletteConfig {
    /// Check every parameter before any pixel is touched
    ///
    /// # Errors
    ///
    /// `InvalidColorCount` for a color count outside 3-10, `ConfigError`
    /// for unusable clustering settings.
    pub fn validate(&self) -> Result<()> {
        if !(palette_size::MIN_COLORS..=palette_size::MAX_COLORS).contains(&self.color_count) {
            let samples = self.extraction.working_size as usize * self.extraction.working_size as usize;
            return Err(PaletteError::InvalidColorCount {
                requested: self.color_count,
                min: palette_size::MIN_COLORS,
                max: palette_size::MAX_COLORS,
                available: samples,
            });
        }
        self.extraction.validate()
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaletteError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PaletteError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PaletteError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            PaletteError::config(format!("Failed to write {}", path.display()), e)
        })
    }
}

impl ExtractionConfig {
    /// Reject settings that would make clustering meaningless
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| PaletteError::ConfigError {
            message: message.to_string(),
            source: None,
        };

        if self.working_size == 0 {
            return Err(invalid("working_size must be at least 1"));
        }
        if self.trials == 0 {
            return Err(invalid("trials must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(invalid("tolerance must be a finite, non-negative number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_settings() {
        let config = PaletteConfig::default();
        assert_eq!(config.color_count, 5);
        assert_eq!(config.seed, 42);
        assert_eq!(config.sort_key, SortKey::Frequency);
        assert_eq!(config.extraction.working_size, 150);
        assert_eq!(config.extraction.trials, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_color_count() {
        for count in [0, 2, 11, 50] {
            let config = PaletteConfig {
                color_count: count,
                ..PaletteConfig::default()
            };
            match config.validate() {
                Err(PaletteError::InvalidColorCount { requested, .. }) => {
                    assert_eq!(requested, count)
                }
                other => panic!("Expected InvalidColorCount, got: {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_extraction() {
        let mut config = ExtractionConfig::default();
        config.trials = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.tolerance = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.working_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PaletteConfig =
            serde_json::from_str(r#"{ "color_count": 8, "sort_key": "Hue" }"#).unwrap();
        assert_eq!(config.color_count, 8);
        assert_eq!(config.sort_key, SortKey::Hue);
        assert_eq!(config.seed, 42);
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.json");

        let config = PaletteConfig {
            color_count: 7,
            sort_key: SortKey::Lightness,
            seed: 7,
            extraction: ExtractionConfig {
                filter: ResizeFilter::Nearest,
                ..ExtractionConfig::default()
            },
        };
        config.to_json_file(&path).unwrap();

        let loaded = PaletteConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_json_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            PaletteConfig::from_json_file(&missing),
            Err(PaletteError::ConfigError { .. })
        ));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "not json").unwrap();
        assert!(matches!(
            PaletteConfig::from_json_file(&garbage),
            Err(PaletteError::ConfigError { .. })
        ));

        let out_of_range = dir.path().join("range.json");
        std::fs::write(&out_of_range, r#"{ "color_count": 20 }"#).unwrap();
        assert!(matches!(
            PaletteConfig::from_json_file(&out_of_range),
            Err(PaletteError::InvalidColorCount { .. })
        ));
    }
}
