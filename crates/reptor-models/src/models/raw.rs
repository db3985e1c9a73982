// crates/reptor-models/src/models/raw.rs
// ============================================================================
// Module: Raw Field Data
// Description: Unvalidated `data` objects of findings, sections, and templates.
// Purpose: Carry arbitrary field data until it is bound against a design.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`RawData`] holds the `data` object exactly as the API returned it. It
//! accepts any keys so resources can be decoded before their design is known,
//! and keeps key order for faithful re-serialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Raw Data
// ============================================================================

/// Unvalidated field data keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawData(Map<String, Value>);

/// Raw data of a report section.
pub type SectionDataRaw = RawData;

/// Raw data of a finding or finding template translation.
pub type FindingDataRaw = RawData;

impl RawData {
    /// Creates empty raw data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for a field id.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Stores a value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// Removes a value, returning it when present.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.shift_remove(field)
    }

    /// Returns the `title` field when it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Borrows the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Number of stored fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no field is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawData {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
