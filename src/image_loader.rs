//! Image loading for palette extraction
//!
//! This module turns uploaded files (or their raw bytes) into an 8-bit RGB
//! pixel grid ready for clustering.
//!
//! ## Supported Formats
//!
//! Via the `image` crate: JPEG, PNG, GIF (first frame), WebP, TIFF, BMP,
//! ICO, TGA, PNM and QOI.
//!
//! ## Design
//!
//! Every image is converted to `RgbImage`; alpha is dropped and wide or
//! high bit depth formats are reduced to 8 bits per channel.

use crate::error::{PaletteError, Result};
use image::{DynamicImage, ImageReader, RgbImage};
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            _ => None,
        }
    }

    fn decoder_format(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Ico => image::ImageFormat::Ico,
            ImageFormat::Tga => image::ImageFormat::Tga,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Qoi => image::ImageFormat::Qoi,
        }
    }
}

/// Load an image from disk as 8-bit RGB
///
/// The decoder is chosen from the file extension.
///
/// # Errors
///
/// - `UnsupportedFormat` if the extension is unknown
/// - `ImageLoadError` if the file cannot be opened or decoded
///
/// # Example
///
/// ```rust,no_run
/// use palette_extract::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), palette_extract::PaletteError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let format = ImageFormat::from_extension(path).ok_or_else(|| {
        PaletteError::UnsupportedFormat {
            path: path.display().to_string(),
        }
    })?;

    let mut reader = ImageReader::open(path).map_err(|e| {
        PaletteError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    reader.set_format(format.decoder_format());

    let img: DynamicImage = reader.decode().map_err(|e| {
        PaletteError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "image decoded"
    );
    Ok(img.to_rgb8())
}

/// Decode an in-memory upload, guessing the format from its contents
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PaletteError::image_load("Failed to decode uploaded image", e))?;
    Ok(img.to_rgb8())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "pbm", "pgm",
        "ppm", "pnm", "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("scan.BMP")),
            Some(ImageFormat::Bmp)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("photo.heic")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("photo")), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(is_supported_extension("bmp"));
        assert!(!is_supported_extension("xyz"));
        assert!(!is_supported_extension("doc"));

        // Every listed extension maps to a format
        for ext in supported_extensions() {
            let name = format!("file.{}", ext);
            assert!(ImageFormat::from_extension(Path::new(&name)).is_some(), "{}", ext);
        }
    }

    #[test]
    fn test_load_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");

        let mut original = RgbImage::new(2, 2);
        original.put_pixel(0, 0, Rgb([255, 0, 0]));
        original.put_pixel(1, 0, Rgb([0, 255, 0]));
        original.put_pixel(0, 1, Rgb([0, 0, 255]));
        original.put_pixel(1, 1, Rgb([255, 255, 255]));
        original.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_decode_bytes() {
        let mut bytes = Vec::new();
        let original = RgbImage::from_pixel(3, 1, Rgb([10, 20, 30]));
        original
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        assert_eq!(decode_bytes(&bytes).unwrap(), original);
        assert!(decode_bytes(b"not an image").is_err());
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            load_image(Path::new("palette.xyz")),
            Err(PaletteError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            load_image(Path::new("nonexistent_file.jpg")),
            Err(PaletteError::ImageLoadError { .. })
        ));
    }
}
