// crates/reptor-models/src/binding/record.rs
// ============================================================================
// Module: Bound Records
// Description: Finding or section data bound field by field against a design.
// Purpose: Aggregate per-field validation into one all-or-nothing result.
// Dependencies: crate::binding::field, crate::schema, serde_json, tracing
// ============================================================================

//! ## Overview
//! A [`BoundRecord`] binds a raw data object against an ordered list of field
//! schemas. Every field is attempted even after a failure; failures are logged
//! and collected, and construction fails once with a [`BindError`] listing all
//! of them. Keys absent from the raw data are skipped: the `required` flag of
//! a schema is advisory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::binding::field::BindMode;
use crate::binding::field::BoundField;
use crate::binding::field::FieldError;
use crate::binding::field::FieldIter;
use crate::schema::FieldSchema;

// ============================================================================
// SECTION: Bound Record
// ============================================================================

/// Data of one finding or section, bound against design fields.
///
/// # Invariants
/// - Fields appear in schema order, at most once each.
/// - Every field is bound against the schema of the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRecord {
    /// Schemas the record binds against, in design order.
    schema: Vec<Arc<FieldSchema>>,
    /// Bound fields present in the raw data.
    fields: Vec<BoundField>,
    /// Strictness used for construction and later writes.
    mode: BindMode,
}

/// Bound data of a report section.
pub type SectionData = BoundRecord;

/// Bound data of a finding.
pub type FindingData = BoundRecord;

impl BoundRecord {
    /// Binds `raw` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] listing every field that failed validation and,
    /// in strict mode, every raw key with no schema field.
    pub fn bind(
        schema: &[Arc<FieldSchema>],
        raw: &Map<String, Value>,
        mode: BindMode,
    ) -> Result<Self, BindError> {
        let mut fields = Vec::with_capacity(schema.len());
        let mut errors = Vec::new();
        for field_schema in schema {
            let Some(value) = raw.get(&field_schema.id) else {
                continue;
            };
            match BoundField::bind(Arc::clone(field_schema), value, mode) {
                Ok(field) => fields.push(field),
                Err(err) => {
                    warn!(field = %field_schema.id, error = %err, "field failed validation");
                    errors.push(err);
                }
            }
        }
        if mode.is_strict() {
            for key in raw.keys() {
                if !schema.iter().any(|field_schema| &field_schema.id == key) {
                    warn!(field = %key, "field is not part of the design");
                    errors.push(FieldError::UnknownField(key.clone()));
                }
            }
        }
        if !errors.is_empty() {
            return Err(BindError::new(errors));
        }
        debug!(fields = fields.len(), "record bound");
        Ok(Self {
            schema: schema.to_vec(),
            fields,
            mode,
        })
    }

    /// Binds a raw JSON value that must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when `raw` is not an object or binding fails.
    pub fn bind_json(
        schema: &[Arc<FieldSchema>],
        raw: &Value,
        mode: BindMode,
    ) -> Result<Self, BindError> {
        match raw {
            Value::Object(map) => Self::bind(schema, map, mode),
            _ => Err(BindError::new(vec![FieldError::Invalid {
                path: "data".to_string(),
                expected: "an object".to_string(),
                received: raw.clone(),
            }])),
        }
    }

    /// Returns the bound field with the given id.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoundField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the bound field with the given id for in-place updates.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut BoundField> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    /// Sets a field from a raw value, adding it when absent from the record.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] when the design has no such field
    /// and other [`FieldError`] variants when validation fails. The record is
    /// unchanged on error.
    pub fn set(&mut self, name: &str, raw: &Value) -> Result<(), FieldError> {
        if let Some(field) = self.get_mut(name) {
            return field.set_value(raw);
        }
        let Some(position) = self.schema_position(name) else {
            return Err(FieldError::UnknownField(name.to_string()));
        };
        let field = BoundField::bind(Arc::clone(&self.schema[position]), raw, self.mode)?;
        let index = self
            .fields
            .iter()
            .position(|existing| self.schema_position(existing.name()) > Some(position))
            .unwrap_or(self.fields.len());
        self.fields.insert(index, field);
        Ok(())
    }

    /// Removes a field from the record, returning it when present.
    pub fn remove(&mut self, name: &str) -> Option<BoundField> {
        let index = self.fields.iter().position(|field| field.name() == name)?;
        Some(self.fields.remove(index))
    }

    /// Bound fields in schema order.
    #[must_use]
    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    /// Schemas the record binds against.
    #[must_use]
    pub fn schema(&self) -> &[Arc<FieldSchema>] {
        &self.schema
    }

    /// Strictness used by the record.
    #[must_use]
    pub const fn mode(&self) -> BindMode {
        self.mode
    }

    /// Number of top-level bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Walks every field, descending into lists and objects.
    #[must_use]
    pub fn iter(&self) -> FieldIter<'_> {
        FieldIter::new(self.fields.iter().collect())
    }

    /// Serializes the record to a JSON object in schema order.
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|field| field.is_serializable())
            .map(|field| (field.name().to_string(), field.to_json()))
            .collect()
    }

    /// Position of a field id within the schema list.
    fn schema_position(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|field_schema| field_schema.id == name)
    }
}

impl<'a> IntoIterator for &'a BoundRecord {
    type Item = &'a BoundField;
    type IntoIter = FieldIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Aggregate failure of record binding.
///
/// # Invariants
/// - `errors` is never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} field(s) failed to bind: {}", .errors.len(), join_errors(.errors))]
pub struct BindError {
    /// Every field-level failure, in the order they were found.
    errors: Vec<FieldError>,
}

impl BindError {
    /// Wraps the collected field errors.
    pub(crate) const fn new(errors: Vec<FieldError>) -> Self {
        Self {
            errors,
        }
    }

    /// Field-level failures.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Paths of the failing fields.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(FieldError::path)
    }
}

/// Renders field errors as one `;`-separated line.
fn join_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
