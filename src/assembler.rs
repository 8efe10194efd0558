//! Palette assembly
//!
//! Turns extracted clusters into an ordered, immutable [`Palette`]. Entries
//! are always ranked by weight first so the dominant/secondary/accent roles
//! have a stable basis; an HSL sort key then reorders that ranking with a
//! stable sort, so equal keys keep their frequency order.

use std::fmt;
use std::str::FromStr;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::{ColorSample, HslColor};
use crate::config::{ExtractionConfig, PaletteConfig};
use crate::extraction::{Cluster, ClusterExtractor};
use crate::history::PaletteHistory;
use crate::{PaletteError, Result};

/// Display order of a palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Descending by weight
    #[default]
    Frequency,
    /// Ascending by hue
    Hue,
    /// Ascending by lightness
    Lightness,
    /// Ascending by saturation
    Saturation,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Frequency,
        SortKey::Hue,
        SortKey::Lightness,
        SortKey::Saturation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Frequency => "Frequency",
            SortKey::Hue => "Hue",
            SortKey::Lightness => "Lightness",
            SortKey::Saturation => "Saturation",
        }
    }

    /// HSL component this key orders by, `None` for frequency
    fn component(&self, hsl: &HslColor) -> Option<f64> {
        match self {
            SortKey::Frequency => None,
            SortKey::Hue => Some(hsl.hue),
            SortKey::Lightness => Some(hsl.lightness),
            SortKey::Saturation => Some(hsl.saturation),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = PaletteError;

    /// Case-insensitive parse of the key name
    fn from_str(s: &str) -> Result<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaletteError::InvalidParameter {
                parameter: "sort_key".to_string(),
                value: s.to_string(),
            })
    }
}

/// One palette color with its pixel share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub color: ColorSample,
    /// Percentage of sampled pixels, in `[0, 100]`
    pub weight: f64,
}

impl PaletteEntry {
    pub fn hex(&self) -> &str {
        self.color.hex()
    }
}

impl From<Cluster> for PaletteEntry {
    fn from(cluster: Cluster) -> Self {
        Self {
            color: cluster.color,
            weight: cluster.weight,
        }
    }
}

/// Design role in the 60-30-10 rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Dominant,
    Secondary,
    Accent,
}

impl Role {
    /// Role of the entry at `index` in display order
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Role::Dominant,
            1 => Role::Secondary,
            _ => Role::Accent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Dominant => "Dominant",
            Role::Secondary => "Secondary",
            Role::Accent => "Accent",
        }
    }

    /// Where an interior designer would use a color with this role
    pub fn application(&self) -> &'static str {
        match self {
            Role::Dominant => "Walls / Large Rugs",
            Role::Secondary => "Furniture / Curtains",
            Role::Accent => "Decor / Pillows",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered palette produced for one image and parameter set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    sort_key: SortKey,
}

impl Palette {
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    /// Hex codes in display order
    pub fn hex_codes(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.hex().to_string()).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds palettes from images
#[derive(Debug, Clone, Default)]
pub struct PaletteAssembler {
    extractor: ClusterExtractor,
}

impl PaletteAssembler {
    /// Create an assembler with default clustering parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with custom clustering parameters
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            extractor: ClusterExtractor::with_config(config),
        }
    }

    /// Extract and order a palette
    ///
    /// # Errors
    ///
    /// Propagates `EmptyImage`, `InvalidColorCount` and `ConfigError` from
    /// the extractor.
    pub fn build(
        &self,
        image: &RgbImage,
        k: usize,
        seed: u64,
        sort_key: SortKey,
    ) -> Result<Palette> {
        let clusters = self.extractor.extract(image, k, seed)?;
        let mut entries: Vec<PaletteEntry> = clusters.into_iter().map(PaletteEntry::from).collect();
        sort_entries(&mut entries, sort_key);

        tracing::debug!(colors = entries.len(), %sort_key, "palette assembled");
        Ok(Palette { entries, sort_key })
    }

    /// Create an assembler whose clustering follows `config.extraction`
    pub fn from_config(config: &PaletteConfig) -> Self {
        Self::with_config(config.extraction.clone())
    }

    /// Build with every setting taken from `config`
    ///
    /// Request parameters and clustering parameters both come from
    /// `config`; the whole config is validated before any work.
    pub fn build_with(image: &RgbImage, config: &PaletteConfig) -> Result<Palette> {
        config.validate()?;
        Self::from_config(config).build(image, config.color_count, config.seed, config.sort_key)
    }

    /// Build a palette from `config` and append it to the caller's history
    /// under `name`
    pub fn build_recorded(
        image: &RgbImage,
        name: &str,
        config: &PaletteConfig,
        history: &mut PaletteHistory,
    ) -> Result<Palette> {
        let palette = Self::build_with(image, config)?;
        history.record(name, &palette);
        Ok(palette)
    }

    /// Pair each entry with its design role, in display order
    pub fn assign_roles(palette: &Palette) -> Vec<(Role, &PaletteEntry)> {
        palette
            .iter()
            .enumerate()
            .map(|(index, entry)| (Role::for_index(index), entry))
            .collect()
    }
}

/// Frequency ranking first, then an optional stable HSL reorder
fn sort_entries(entries: &mut [PaletteEntry], sort_key: SortKey) {
    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    if sort_key != SortKey::Frequency {
        entries.sort_by_cached_key(|entry| {
            let hsl = entry.color.hsl();
            OrderedComponent(sort_key.component(&hsl).unwrap_or(0.0))
        });
    }
}

/// Total order over an HSL component for use as a sort key
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedComponent(f64);

impl Eq for OrderedComponent {}

impl PartialOrd for OrderedComponent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedComponent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
