// crates/reptor-models/src/models/section.rs
// ============================================================================
// Module: Report Sections
// Description: Report sections as returned by the API and bound to a design.
// Purpose: Pair section metadata with schema-validated section data.
// Dependencies: crate::binding, crate::schema, crate::models, serde, time
// ============================================================================

//! ## Overview
//! [`SectionRaw`] is the section exactly as decoded from the API. [`Section`]
//! keeps the same metadata and replaces the raw data with a [`SectionData`]
//! bound against the design's `report_fields`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;

use crate::binding::BindError;
use crate::binding::BindMode;
use crate::binding::SectionData;
use crate::identifiers::ProjectDesignId;
use crate::identifiers::ProjectId;
use crate::identifiers::SectionId;
use crate::models::ModelError;
use crate::models::raw::SectionDataRaw;
use crate::models::user::LockInfo;
use crate::models::user::User;
use crate::schema::ProjectDesign;

// ============================================================================
// SECTION: Section Metadata
// ============================================================================

/// Section attributes other than its field data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMeta {
    /// Section identifier.
    pub id: SectionId,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Ids of the report fields shown in this section.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
    /// Design of the owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectDesignId>,
    /// Report language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Review status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Assigned user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// Current edit lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_info: Option<LockInfo>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated: Option<OffsetDateTime>,
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Section with unvalidated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRaw {
    /// Section metadata.
    #[serde(flatten)]
    pub meta: SectionMeta,
    /// Field data keyed by report field id.
    #[serde(default)]
    pub data: SectionDataRaw,
}

/// Section with data bound against a project design.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Section metadata.
    pub meta: SectionMeta,
    /// Bound field data.
    pub data: SectionData,
}

impl Section {
    /// Binds a raw section against the design's report fields.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when any field fails validation.
    pub fn bind(raw: SectionRaw, design: &ProjectDesign, mode: BindMode) -> Result<Self, BindError> {
        let data = SectionData::bind(&design.report_fields, raw.data.as_map(), mode)?;
        Ok(Self {
            meta: raw.meta,
            data,
        })
    }

    /// Decodes and binds a section API response.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when decoding or binding fails.
    pub fn from_json(raw: &Value, design: &ProjectDesign, mode: BindMode) -> Result<Self, ModelError> {
        let raw = SectionRaw::deserialize(raw).map_err(|err| ModelError::Decode {
            resource: "section",
            reason: err.to_string(),
        })?;
        Ok(Self::bind(raw, design, mode)?)
    }

    /// Section identifier.
    #[must_use]
    pub const fn id(&self) -> &SectionId {
        &self.meta.id
    }

    /// Serializes metadata and bound data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Encode`] when the metadata cannot be serialized.
    pub fn to_json(&self) -> Result<Value, ModelError> {
        let mut value = serde_json::to_value(&self.meta).map_err(|err| ModelError::Encode {
            resource: "section",
            reason: err.to_string(),
        })?;
        if let Value::Object(map) = &mut value {
            map.insert("data".to_string(), Value::Object(self.data.to_json()));
        }
        Ok(value)
    }

    /// Request body updating the section data.
    #[must_use]
    pub fn update_body(&self) -> Value {
        json!({ "data": self.data.to_json() })
    }
}
