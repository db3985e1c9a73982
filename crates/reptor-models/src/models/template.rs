// crates/reptor-models/src/models/template.rs
// ============================================================================
// Module: Finding Templates
// Description: Reusable finding templates with per-language translations.
// Purpose: Select template translations and bind them against a design.
// Dependencies: crate::binding, crate::schema, crate::models, serde, time
// ============================================================================

//! ## Overview
//! Templates are shared across designs, so their translation data may carry
//! fields a given design lacks. Bind them in [`BindMode::Lenient`] to ignore
//! such fields, or in strict mode to detect them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::binding::BindError;
use crate::binding::BindMode;
use crate::binding::FindingData;
use crate::identifiers::TemplateId;
use crate::identifiers::TranslationId;
use crate::models::raw::FindingDataRaw;
use crate::models::user::LockInfo;
use crate::schema::ProjectDesign;

// ============================================================================
// SECTION: Templates
// ============================================================================

/// Finding template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingTemplate {
    /// Template identifier.
    pub id: TemplateId,
    /// Number of findings created from the template.
    #[serde(default)]
    pub usage_count: u64,
    /// Provenance (created, imported, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Current edit lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_info: Option<LockInfo>,
    /// Language variants of the template.
    #[serde(default)]
    pub translations: Vec<FindingTemplateTranslation>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated: Option<OffsetDateTime>,
}

impl FindingTemplate {
    /// Translation marked as main, or the first one when none is marked.
    #[must_use]
    pub fn main_translation(&self) -> Option<&FindingTemplateTranslation> {
        self.translations
            .iter()
            .find(|translation| translation.is_main)
            .or_else(|| self.translations.first())
    }

    /// Translation for a language code such as `en-US`.
    #[must_use]
    pub fn translation(&self, language: &str) -> Option<&FindingTemplateTranslation> {
        self.translations.iter().find(|translation| translation.language == language)
    }

    /// Title of the main translation.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.main_translation().and_then(|translation| translation.data.title())
    }
}

/// One language variant of a finding template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingTemplateTranslation {
    /// Translation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TranslationId>,
    /// Language code.
    pub language: String,
    /// Whether this is the template's main language.
    #[serde(default)]
    pub is_main: bool,
    /// Review status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Risk score derived from the CVSS vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    /// Risk level derived from the risk score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    /// Finding field data.
    #[serde(default)]
    pub data: FindingDataRaw,
}

impl FindingTemplateTranslation {
    /// Binds the translation data against the design's finding fields.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] when any field fails validation.
    pub fn bind(&self, design: &ProjectDesign, mode: BindMode) -> Result<FindingData, BindError> {
        FindingData::bind(&design.finding_fields, self.data.as_map(), mode)
    }
}
