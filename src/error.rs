//! Error types for the palette_extract library

use thiserror::Error;

/// Result type alias for palette_extract operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Error kinds raised while decoding input, clustering pixels or loading configuration
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Hex color string is not `#rrggbb` / `rrggbb`
    #[error("Invalid hex color {input:?}: {reason}")]
    InvalidFormat { input: String, reason: String },

    /// Requested color count is outside the accepted range or cannot be satisfied
    #[error("Invalid color count {requested}: expected {min}..={max} with at most {available} sampled pixels")]
    InvalidColorCount {
        requested: usize,
        min: usize,
        max: usize,
        available: usize,
    },

    /// Image has no pixels to cluster
    #[error("Image has no usable pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File extension is not a known raster format
    #[error("Unsupported image format: {path}")]
    UnsupportedFormat { path: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Palette could not be serialized for export
    #[error("Export failed: {message}")]
    ExportError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PaletteError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid hex error
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Check if the caller can recover by changing its input parameters
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaletteError::InvalidFormat { .. }
                | PaletteError::InvalidColorCount { .. }
                | PaletteError::InvalidParameter { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::InvalidFormat { input, .. } => {
                format!("'{}' is not a valid hex color. Use the form #rrggbb.", input)
            }
            PaletteError::InvalidColorCount { min, max, .. } => {
                format!("Please choose between {} and {} colors.", min, max)
            }
            PaletteError::EmptyImage { .. } => {
                "The image has no pixels to analyze. Please try a different image.".to_string()
            }
            PaletteError::ImageLoadError { .. } | PaletteError::UnsupportedFormat { .. } => {
                "Could not load the image. Please upload a JPEG, PNG or BMP file.".to_string()
            }
            PaletteError::InvalidParameter { parameter, value } => {
                format!("'{}' is not a valid value for {}.", value, parameter)
            }
            PaletteError::ExportError { .. } => {
                "The palette could not be exported. Please try again.".to_string()
            }
            PaletteError::ConfigError { .. } => {
                "The settings file could not be used. Please check its contents.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(PaletteError::invalid_format("#zz", "bad digits").is_recoverable());
        assert!(PaletteError::InvalidColorCount {
            requested: 12,
            min: 3,
            max: 10,
            available: 22_500,
        }
        .is_recoverable());
        assert!(!PaletteError::EmptyImage { width: 0, height: 0 }.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = PaletteError::invalid_format("#12345", "expected 6 hex digits, got 5");
        assert_eq!(
            err.to_string(),
            "Invalid hex color \"#12345\": expected 6 hex digits, got 5"
        );

        let err = PaletteError::EmptyImage { width: 0, height: 4 };
        assert_eq!(err.to_string(), "Image has no usable pixels (0x4)");
    }

    #[test]
    fn test_user_message_mentions_range() {
        let err = PaletteError::InvalidColorCount {
            requested: 2,
            min: 3,
            max: 10,
            available: 22_500,
        };
        assert_eq!(err.user_message(), "Please choose between 3 and 10 colors.");
    }

    #[test]
    fn test_image_load_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PaletteError::image_load("Failed to open photo.jpg", io);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Failed to load image: Failed to open photo.jpg");
    }
}
