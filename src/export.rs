//! Text export formats for a palette
//!
//! - CSS custom properties (`--color-1` ... in a `:root` block)
//! - Newline separated hex codes
//! - JSON records with hex, CSS `rgb()` string and weight

use serde::Serialize;

use crate::assembler::Palette;
use crate::{PaletteError, Result};

/// One color as written by [`json_records`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRecord {
    pub hex: String,
    pub rgb: String,
    pub weight: f64,
}

/// `:root { --color-1: #rrggbb; ... }`
pub fn css_variables(palette: &Palette) -> String {
    let mut css = String::from(":root {\n");
    for (index, entry) in palette.iter().enumerate() {
        css.push_str(&format!("  --color-{}: {};\n", index + 1, entry.hex()));
    }
    css.push_str("}\n");
    css
}

/// One hex code per line, in display order
pub fn hex_list(palette: &Palette) -> String {
    palette.hex_codes().join("\n")
}

/// Structured records in display order
pub fn records(palette: &Palette) -> Vec<ColorRecord> {
    palette
        .iter()
        .map(|entry| ColorRecord {
            hex: entry.hex().to_string(),
            rgb: entry.color.rgb_string(),
            weight: entry.weight,
        })
        .collect()
}

/// Pretty-printed JSON array of [`ColorRecord`]s
pub fn json_records(palette: &Palette) -> Result<String> {
    serde_json::to_string_pretty(&records(palette)).map_err(|e| PaletteError::ExportError {
        message: "Failed to serialize palette records".to_string(),
        source: Some(Box::new(e)),
    })
}
