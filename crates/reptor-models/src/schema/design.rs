// crates/reptor-models/src/schema/design.rs
// ============================================================================
// Module: Project Designs
// Description: Finding and report field schemas of one project design.
// Purpose: Build the schema tree that findings and sections bind against.
// Dependencies: crate::schema::field, crate::identifiers, serde, time
// ============================================================================

//! ## Overview
//! A project design owns two ordered field lists: `finding_fields` for
//! findings and `report_fields` for report sections. Report fields arrive
//! either as a flat collection or grouped into `report_sections`; grouped
//! input is flattened in section order and the grouping is discarded.
//!
//! The API also serves an overview variant of a design whose field
//! collections are reference URLs. Binding needs inline definitions, so the
//! overview variant is rejected instead of producing an empty schema.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::identifiers::ProjectDesignId;
use crate::schema::field::FieldSchema;
use crate::schema::field::SchemaError;
use crate::schema::field::ensure_unique_ids;
use crate::schema::field::fields_from_json;

// ============================================================================
// SECTION: Design Metadata
// ============================================================================

/// Visibility scope of a project design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignScope {
    /// Shared with every user.
    Global,
    /// Owned by a single user.
    Private,
    /// Copy attached to one project.
    Project,
}

/// Metadata keys of a design; field collections are handled separately.
#[derive(Debug, Deserialize)]
struct DesignHeader {
    /// Design identifier.
    id: Option<ProjectDesignId>,
    /// Display name.
    name: Option<String>,
    /// Visibility scope.
    scope: Option<DesignScope>,
    /// Provenance (created, imported, customized, ...).
    source: Option<String>,
    /// Default report language.
    language: Option<String>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    updated: Option<OffsetDateTime>,
}

// ============================================================================
// SECTION: Project Design
// ============================================================================

/// Field schemas of a project design.
///
/// # Invariants
/// - Field ids are unique within `finding_fields` and within `report_fields`.
/// - Field order matches the order the server returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDesign {
    /// Design identifier.
    pub id: Option<ProjectDesignId>,
    /// Display name.
    pub name: String,
    /// Visibility scope.
    pub scope: Option<DesignScope>,
    /// Provenance tag.
    pub source: Option<String>,
    /// Default report language.
    pub language: Option<String>,
    /// Creation timestamp.
    pub created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    pub updated: Option<OffsetDateTime>,
    /// Schemas of finding fields.
    pub finding_fields: Vec<Arc<FieldSchema>>,
    /// Schemas of report fields, flattened across sections.
    pub report_fields: Vec<Arc<FieldSchema>>,
}

impl ProjectDesign {
    /// Builds a design from the project-design (or project type) JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::OverviewDesign`] for the overview variant and
    /// other [`SchemaError`] variants for malformed field definitions.
    pub fn from_json(raw: &Value) -> Result<Self, SchemaError> {
        let Value::Object(map) = raw else {
            return Err(SchemaError::InvalidCollection("project design".to_string()));
        };
        let header = DesignHeader::deserialize(raw).map_err(|err| {
            SchemaError::InvalidAttribute {
                field: "project design".to_string(),
                reason: err.to_string(),
            }
        })?;

        let finding_fields = match map.get("finding_fields") {
            Some(fields) if !fields.is_null() => design_fields("finding_fields", fields)?,
            _ => Vec::new(),
        };
        let report_fields = match (map.get("report_fields"), map.get("report_sections")) {
            (Some(fields), _) if !fields.is_null() => design_fields("report_fields", fields)?,
            (_, Some(sections)) if !sections.is_null() => flatten_report_sections(sections)?,
            _ => Vec::new(),
        };

        Ok(Self {
            id: header.id,
            name: header.name.unwrap_or_default(),
            scope: header.scope,
            source: header.source,
            language: header.language,
            created: header.created,
            updated: header.updated,
            finding_fields,
            report_fields,
        })
    }

    /// Creates a design directly from field lists.
    #[must_use]
    pub fn with_fields(finding_fields: Vec<FieldSchema>, report_fields: Vec<FieldSchema>) -> Self {
        Self {
            id: None,
            name: String::new(),
            scope: None,
            source: None,
            language: None,
            created: None,
            updated: None,
            finding_fields: finding_fields.into_iter().map(Arc::new).collect(),
            report_fields: report_fields.into_iter().map(Arc::new).collect(),
        }
    }

    /// Looks up a finding field schema by id.
    #[must_use]
    pub fn finding_field(&self, id: &str) -> Option<&Arc<FieldSchema>> {
        self.finding_fields.iter().find(|field| field.id == id)
    }

    /// Looks up a report field schema by id.
    #[must_use]
    pub fn report_field(&self, id: &str) -> Option<&Arc<FieldSchema>> {
        self.report_fields.iter().find(|field| field.id == id)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a design-level field collection; a string means the overview variant.
fn design_fields(collection: &str, raw: &Value) -> Result<Vec<Arc<FieldSchema>>, SchemaError> {
    if raw.is_string() {
        return Err(SchemaError::OverviewDesign(collection.to_string()));
    }
    fields_from_json(collection, raw)
}

/// Flattens `report_sections[*].fields` into one ordered schema list.
fn flatten_report_sections(raw: &Value) -> Result<Vec<Arc<FieldSchema>>, SchemaError> {
    let sections = match raw {
        Value::Array(sections) => sections,
        Value::String(_) => return Err(SchemaError::OverviewDesign("report_sections".to_string())),
        _ => return Err(SchemaError::InvalidCollection("report_sections".to_string())),
    };
    let mut fields = Vec::new();
    for section in sections {
        let Value::Object(section) = section else {
            return Err(SchemaError::InvalidCollection("report_sections".to_string()));
        };
        match section.get("fields") {
            Some(Value::Array(definitions)) => {
                for definition in definitions {
                    fields.push(Arc::new(FieldSchema::from_json(None, definition)?));
                }
            }
            Some(Value::String(_)) => {
                return Err(SchemaError::OverviewDesign("report_sections".to_string()));
            }
            None | Some(Value::Null) => {}
            Some(_) => {
                return Err(SchemaError::InvalidCollection("report_sections.fields".to_string()));
            }
        }
    }
    ensure_unique_ids(&fields)?;
    Ok(fields)
}
