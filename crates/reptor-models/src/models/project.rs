// crates/reptor-models/src/models/project.rs
// ============================================================================
// Module: Projects
// Description: Pentest projects with their members, sections, and findings.
// Purpose: Decode project responses and bind their content in one pass.
// Dependencies: crate::binding, crate::schema, crate::models, serde, time
// ============================================================================

//! ## Overview
//! A project response embeds its sections and findings in raw form. Binding
//! them needs the project's design, fetched separately via `project_type`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::binding::BindError;
use crate::binding::BindMode;
use crate::identifiers::ProjectDesignId;
use crate::identifiers::ProjectId;
use crate::models::ModelError;
use crate::models::finding::Finding;
use crate::models::finding::FindingRaw;
use crate::models::section::Section;
use crate::models::section::SectionRaw;
use crate::models::user::ProjectMember;
use crate::schema::ProjectDesign;

// ============================================================================
// SECTION: Projects
// ============================================================================

/// Pentest project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Design used by the project.
    pub project_type: ProjectDesignId,
    /// Report language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the project is finished and read-only.
    #[serde(default)]
    pub readonly: bool,
    /// Provenance (created, imported, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Members with access to the project.
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    /// Members imported from another instance.
    #[serde(default)]
    pub imported_members: Vec<ProjectMember>,
    /// Report sections.
    #[serde(default)]
    pub sections: Vec<SectionRaw>,
    /// Findings.
    #[serde(default)]
    pub findings: Vec<FindingRaw>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated: Option<OffsetDateTime>,
}

impl Project {
    /// Decodes a project API response.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Decode`] when the response is malformed.
    pub fn from_json(raw: &Value) -> Result<Self, ModelError> {
        Self::deserialize(raw).map_err(|err| ModelError::Decode {
            resource: "project",
            reason: err.to_string(),
        })
    }

    /// Binds every embedded section.
    ///
    /// # Errors
    ///
    /// Returns the [`BindError`] of the first section that fails.
    pub fn bind_sections(
        &self,
        design: &ProjectDesign,
        mode: BindMode,
    ) -> Result<Vec<Section>, BindError> {
        self.sections.iter().cloned().map(|raw| Section::bind(raw, design, mode)).collect()
    }

    /// Binds every embedded finding.
    ///
    /// # Errors
    ///
    /// Returns the [`BindError`] of the first finding that fails.
    pub fn bind_findings(
        &self,
        design: &ProjectDesign,
        mode: BindMode,
    ) -> Result<Vec<Finding>, BindError> {
        self.findings.iter().cloned().map(|raw| Finding::bind(raw, design, mode)).collect()
    }

    /// Whether the design referenced by the project is `design`.
    #[must_use]
    pub fn uses_design(&self, design: &ProjectDesign) -> bool {
        design.id == Some(self.project_type)
    }
}
