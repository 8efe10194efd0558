//! Defaults and reference values for palette extraction
//!
//! Grouped by the stage that consumes them. Runtime overrides live in
//! [`crate::config::PaletteConfig`].

/// Clustering parameters
pub mod clustering {
    /// Side length of the square working image (pixels).
    ///
    /// Every input is resized to this before clustering, so clustering cost
    /// does not depend on input resolution. Color regions smaller than one
    /// working cell may disappear from the palette.
    pub const WORKING_SIZE: u32 = 150;

    /// Seed used when the caller does not choose one
    pub const DEFAULT_SEED: u64 = 42;

    /// Independent k-means restarts; the lowest scoring run wins
    pub const TRIALS: usize = 10;

    /// Iteration cap per restart
    pub const MAX_ITERATIONS: usize = 300;

    /// Convergence threshold on total squared centroid movement
    pub const TOLERANCE: f64 = 1e-4;
}

/// Palette size limits
pub mod palette_size {
    /// Smallest palette a caller may request
    pub const MIN_COLORS: usize = 3;

    /// Largest palette a caller may request
    pub const MAX_COLORS: usize = 10;

    /// Palette size when nothing is configured
    pub const DEFAULT_COLORS: usize = 5;
}

/// Color theory and accessibility
pub mod theory {
    /// Hue rotation for the complementary color (turns)
    pub const COMPLEMENTARY_ROTATION: f64 = 0.5;

    /// Hue rotation for analogous colors (turns, roughly 30 degrees)
    pub const ANALOGOUS_ROTATION: f64 = 0.083;

    /// WCAG 2.x AA threshold for normal text
    pub const WCAG_AA_NORMAL: f64 = 4.5;

    /// sRGB linearization knee used by the WCAG luminance formula
    pub const SRGB_LINEAR_THRESHOLD: f64 = 0.03928;

    /// Channel sum below which swatch captions switch to white text
    pub const LABEL_CHANNEL_SUM_THRESHOLD: u32 = 384;
}
