// crates/reptor-models/src/models/finding.rs
// ============================================================================
// Module: Findings
// Description: Findings as returned by the API and bound to a design.
// Purpose: Pair finding metadata with schema-validated finding data.
// Dependencies: crate::binding, crate::schema, crate::models, serde, time
// ============================================================================

//! ## Overview
//! [`FindingRaw`] is the finding exactly as decoded from the API, or a new
//! finding seeded from a template. [`Finding`] keeps the metadata and binds
//! the data against the design's `finding_fields`.

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
use crate::binding::FindingData;
use crate::identifiers::FindingId;
use crate::identifiers::ProjectDesignId;
use crate::identifiers::ProjectId;
use crate::identifiers::TemplateId;
use crate::models::ModelError;
use crate::models::raw::FindingDataRaw;
use crate::models::template::FindingTemplate;
use crate::models::user::LockInfo;
use crate::models::user::User;
use crate::schema::ProjectDesign;

// ============================================================================
// SECTION: Finding Metadata
// ============================================================================

/// Finding attributes other than its field data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingMeta {
    /// Finding identifier; absent until the server creates the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FindingId>,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
    /// Design of the owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectDesignId>,
    /// Report language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Template the finding was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateId>,
    /// Assigned user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// Review status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Manual sort position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
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
// SECTION: Findings
// ============================================================================

/// Finding with unvalidated data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingRaw {
    /// Finding metadata.
    #[serde(flatten)]
    pub meta: FindingMeta,
    /// Field data keyed by finding field id.
    #[serde(default)]
    pub data: FindingDataRaw,
}

impl FindingRaw {
    /// Seeds a new finding from a template translation.
    ///
    /// Uses the translation for `language` when present, otherwise the main
    /// translation.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingTranslation`] when the template has no
    /// usable translation.
    pub fn from_template(
        template: &FindingTemplate,
        language: Option<&str>,
    ) -> Result<Self, ModelError> {
        let translation = language
            .and_then(|language| template.translation(language))
            .or_else(|| template.main_translation())
            .ok_or(ModelError::MissingTranslation(template.id))?;
        Ok(Self {
            meta: FindingMeta {
                template: Some(template.id),
                language: Some(translation.language.clone()),
                ..FindingMeta::default()
            },
            data: translation.data.clone(),
        })
    }
}

/// Finding with data bound against a project design.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Finding metadata.
    pub meta: FindingMeta,
    /// Bound field data.
    pub data: FindingData,
}

impl Finding {
    /// Binds a raw finding against the design's finding fields.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when any field fails validation.
    pub fn bind(raw: FindingRaw, design: &ProjectDesign, mode: BindMode) -> Result<Self, BindError> {
        let data = FindingData::bind(&design.finding_fields, raw.data.as_map(), mode)?;
        Ok(Self {
            meta: raw.meta,
            data,
        })
    }

    /// Decodes and binds a finding API response.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when decoding or binding fails.
    pub fn from_json(raw: &Value, design: &ProjectDesign, mode: BindMode) -> Result<Self, ModelError> {
        let raw = FindingRaw::deserialize(raw).map_err(|err| ModelError::Decode {
            resource: "finding",
            reason: err.to_string(),
        })?;
        Ok(Self::bind(raw, design, mode)?)
    }

    /// Finding title when the design has a string `title` field.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(|field| field.as_str())
    }

    /// Serializes metadata and bound data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Encode`] when the metadata cannot be serialized.
    pub fn to_json(&self) -> Result<Value, ModelError> {
        let mut value = serde_json::to_value(&self.meta).map_err(|err| ModelError::Encode {
            resource: "finding",
            reason: err.to_string(),
        })?;
        if let Value::Object(map) = &mut value {
            map.insert("data".to_string(), Value::Object(self.data.to_json()));
        }
        Ok(value)
    }

    /// Request body creating or updating the finding.
    #[must_use]
    pub fn update_body(&self) -> Value {
        let mut body = json!({ "data": self.data.to_json() });
        if let (Some(template), Value::Object(map)) = (self.meta.template, &mut body) {
            map.insert("template".to_string(), Value::String(template.to_string()));
        }
        body
    }
}
