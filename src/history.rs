//! Caller-owned palette history
//!
//! A plain ordered log the caller keeps between requests. Recording the
//! same palette for the same source twice in a row is a no-op, so repeated
//! renders of one upload do not flood the log.

use serde::{Deserialize, Serialize};

use crate::assembler::Palette;

/// One remembered palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Source name, usually the uploaded file name
    pub name: String,
    /// Hex codes in display order
    pub colors: Vec<String>,
}

/// Ordered log of generated palettes, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteHistory {
    records: Vec<HistoryRecord>,
}

impl PaletteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `palette` under `name` unless it repeats the latest record
    ///
    /// Returns whether a record was added.
    pub fn record(&mut self, name: &str, palette: &Palette) -> bool {
        let record = HistoryRecord {
            name: name.to_string(),
            colors: palette.hex_codes(),
        };
        if self.records.last() == Some(&record) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Records oldest first
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Records newest first, paired with their 1-based record number
    pub fn iter_recent(&self) -> impl Iterator<Item = (usize, &HistoryRecord)> {
        self.records
            .iter()
            .enumerate()
            .rev()
            .map(|(index, record)| (index + 1, record))
    }
}
