//! Dominant color extraction
//!
//! Reduces an image to `k` representative colors with pixel-share weights:
//! - Downsample to a fixed square working grid
//! - Seeded k-means++ in RGB space (Euclidean distance), several restarts
//! - Truncate each centroid to 8-bit channels
//!
//! Clusters whose centroids truncate to the same color stay separate
//! entries; nothing is merged after clustering.

use image::{imageops, RgbImage};
use kmeans_colors::{get_kmeans, Kmeans};
use palette::Srgb;

use crate::color::{ColorSample, Pixel};
use crate::config::ExtractionConfig;
use crate::constants::palette_size::{MAX_COLORS, MIN_COLORS};
use crate::{PaletteError, Result};

/// One extracted color
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Centroid truncated to 8-bit channels
    pub color: ColorSample,
    /// Number of sampled pixels assigned to this cluster
    pub pixel_count: usize,
    /// Share of sampled pixels, in percent
    pub weight: f64,
}

/// Clusters image pixels into a small set of representative colors
#[derive(Debug, Clone, Default)]
pub struct ClusterExtractor {
    config: ExtractionConfig,
}

impl ClusterExtractor {
    /// Create an extractor with the default working size and k-means budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom clustering parameters
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract `k` colors from `image`
    ///
    /// The result is in cluster order, not sorted. Weights sum to 100.
    ///
    /// # Errors
    ///
    /// - `EmptyImage` if the image (or its working copy) has no pixels
    /// - `InvalidColorCount` if `k` is outside 3-10 or larger than the
    ///   number of sampled pixels
    /// - `ConfigError` if the clustering parameters are unusable
    pub fn extract(&self, image: &RgbImage, k: usize, seed: u64) -> Result<Vec<Cluster>> {
        self.config.validate()?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PaletteError::EmptyImage { width, height });
        }

        let working = self.downsample(image);
        let samples = working_samples(&working);
        let total = samples.len();
        if total == 0 {
            let (width, height) = working.dimensions();
            return Err(PaletteError::EmptyImage { width, height });
        }

        if !(MIN_COLORS..=MAX_COLORS).contains(&k) || k > total {
            return Err(PaletteError::InvalidColorCount {
                requested: k,
                min: MIN_COLORS,
                max: MAX_COLORS,
                available: total,
            });
        }

        tracing::debug!(samples = total, k, seed, "clustering working image");
        let best = self.best_run(&samples, k, seed);
        tracing::debug!(
            score = best.score,
            centroids = best.centroids.len(),
            "k-means finished"
        );

        Ok(clusters_from_run(&best, k, total))
    }

    /// Resize to the square working grid
    fn downsample(&self, image: &RgbImage) -> RgbImage {
        let size = self.config.working_size;
        imageops::resize(image, size, size, self.config.filter.into())
    }

    /// Run `trials` seeded restarts and keep the lowest score; the first run
    /// wins ties
    fn best_run(&self, samples: &[Srgb], k: usize, seed: u64) -> Kmeans<Srgb> {
        let run = |trial: usize| {
            get_kmeans(
                k,
                self.config.max_iterations,
                self.config.tolerance as f32,
                false,
                samples,
                seed.wrapping_add(trial as u64),
            )
        };

        let mut best = run(0);
        for trial in 1..self.config.trials {
            let candidate = run(trial);
            tracing::trace!(trial, score = candidate.score, "k-means trial finished");
            if candidate.score < best.score {
                best = candidate;
            }
        }
        best
    }
}

/// Working pixels as k-means samples
///
/// Channels stay on the 0-255 scale: f32 means of whole channel values are
/// then exact enough to truncate to the right byte.
fn working_samples(working: &RgbImage) -> Vec<Srgb> {
    working
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0.map(f32::from);
            Srgb::new(r, g, b)
        })
        .collect()
}

/// Turn a k-means run into exactly `k` weighted clusters
///
/// Seeding stops early once every sample sits on a centroid, so a run over
/// fewer distinct colors than `k` returns fewer centroids. The missing
/// clusters repeat the last centroid and hold no pixels.
fn clusters_from_run(run: &Kmeans<Srgb>, k: usize, total: usize) -> Vec<Cluster> {
    let mut counts = vec![0usize; k];
    for &index in &run.indices {
        if let Some(count) = counts.get_mut(usize::from(index)) {
            *count += 1;
        }
    }

    let fallback = run
        .centroids
        .last()
        .copied()
        .unwrap_or_else(|| Srgb::new(0.0, 0.0, 0.0));

    counts
        .into_iter()
        .enumerate()
        .map(|(index, pixel_count)| {
            let centroid = run.centroids.get(index).copied().unwrap_or(fallback);
            let channels = [centroid.red, centroid.green, centroid.blue].map(f64::from);
            Cluster {
                color: ColorSample::new(Pixel::from_channels_truncated(channels)),
                pixel_count,
                weight: pixel_count as f64 / total as f64 * 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResizeFilter;
    use image::Rgb;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    /// Left half one color, right half another, no interpolation
    fn halves(left: [u8; 3], right: [u8; 3]) -> RgbImage {
        RgbImage::from_fn(300, 300, |x, _| if x < 150 { Rgb(left) } else { Rgb(right) })
    }

    fn nearest() -> ClusterExtractor {
        ClusterExtractor::with_config(ExtractionConfig {
            filter: ResizeFilter::Nearest,
            ..ExtractionConfig::default()
        })
    }

    /// Three vertical bands of shaded color
    fn bands() -> RgbImage {
        RgbImage::from_fn(90, 60, |x, y| {
            let shade = ((x * 7 + y * 3) % 17) as u8;
            match x / 30 {
                0 => Rgb([200 + shade, 20, 40]),
                1 => Rgb([30, 150 + shade, 60]),
                _ => Rgb([10, 30 + shade, 210]),
            }
        })
    }

    #[test]
    fn test_solid_black_gives_duplicate_black_clusters() {
        let clusters = ClusterExtractor::new()
            .extract(&solid(40, 30, [0, 0, 0]), 3, 42)
            .unwrap();

        assert_eq!(clusters.len(), 3);
        for cluster in &clusters {
            assert_eq!(cluster.color.hex(), "#000000");
        }
        let total: f64 = clusters.iter().map(|c| c.weight).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(clusters.iter().map(|c| c.pixel_count).sum::<usize>(), 22_500);
    }

    #[test]
    fn test_two_color_image() {
        let clusters = nearest()
            .extract(&halves([200, 30, 30], [20, 40, 220]), 3, 42)
            .unwrap();

        assert_eq!(clusters.len(), 3);
        let red = clusters.iter().find(|c| c.color.hex() == "#c81e1e");
        let blue = clusters.iter().find(|c| c.color.hex() == "#1428dc");
        // Nearest sampling keeps the two colors pure; the split may shift by a column
        let red_weight: f64 = clusters
            .iter()
            .filter(|c| c.color.hex() == "#c81e1e")
            .map(|c| c.weight)
            .sum();
        assert!(red.is_some() && blue.is_some(), "{:?}", clusters);
        assert!((red_weight - 50.0).abs() < 1.0, "{}", red_weight);
    }

    #[test]
    fn test_fewer_distinct_colors_than_clusters() {
        let clusters = nearest()
            .extract(&halves([255, 255, 255], [0, 0, 0]), 5, 7)
            .unwrap();

        assert_eq!(clusters.len(), 5);
        assert_eq!(clusters.iter().map(|c| c.pixel_count).sum::<usize>(), 22_500);
        assert!(clusters
            .iter()
            .all(|c| c.color.hex() == "#ffffff" || c.color.hex() == "#000000"));
        let occupied = clusters.iter().filter(|c| c.pixel_count > 0).count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_same_seed_same_clusters() {
        let extractor = ClusterExtractor::new();
        let first = extractor.extract(&bands(), 4, 42).unwrap();
        let second = extractor.extract(&bands(), 4, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_separates_obvious_groups() {
        let clusters = nearest().extract(&bands(), 3, 42).unwrap();

        // One cluster per band, each dominated by its own channel
        let mut dominant: Vec<usize> = clusters
            .iter()
            .map(|c| {
                let channels = c.color.rgb().channels();
                (0..3).max_by_key(|&i| channels[i]).unwrap_or(0)
            })
            .collect();
        dominant.sort_unstable();
        assert_eq!(dominant, vec![0, 1, 2], "{:?}", clusters);

        for cluster in &clusters {
            assert!((cluster.weight - 100.0 / 3.0).abs() < 1.0, "{:?}", cluster);
        }
    }

    #[test]
    fn test_single_trial_is_allowed() {
        let extractor = ClusterExtractor::with_config(ExtractionConfig {
            trials: 1,
            ..ExtractionConfig::default()
        });
        let clusters = extractor.extract(&bands(), 3, 42).unwrap();
        let total: usize = clusters.iter().map(|c| c.pixel_count).sum();
        assert_eq!(total, 22_500);
    }

    #[test]
    fn test_empty_image() {
        match ClusterExtractor::new().extract(&RgbImage::new(0, 10), 3, 42) {
            Err(PaletteError::EmptyImage { width, height }) => {
                assert_eq!((width, height), (0, 10))
            }
            other => panic!("Expected EmptyImage, got: {:?}", other),
        }
    }

    #[test]
    fn test_color_count_bounds() {
        let image = solid(10, 10, [9, 9, 9]);
        for k in [0, 2, 11] {
            assert!(matches!(
                ClusterExtractor::new().extract(&image, k, 42),
                Err(PaletteError::InvalidColorCount { .. })
            ));
        }
    }

    #[test]
    fn test_color_count_above_sample_count() {
        let extractor = ClusterExtractor::with_config(ExtractionConfig {
            working_size: 2,
            ..ExtractionConfig::default()
        });
        match extractor.extract(&solid(10, 10, [1, 2, 3]), 5, 42) {
            Err(PaletteError::InvalidColorCount { requested, available, .. }) => {
                assert_eq!((requested, available), (5, 4))
            }
            other => panic!("Expected InvalidColorCount, got: {:?}", other),
        }
    }
}
