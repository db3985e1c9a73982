// crates/reptor-models/src/models/mod.rs
// ============================================================================
// Module: Resource Models
// Description: Typed SysReptor resources exchanged over the REST API.
// Purpose: Decode API responses and pair their data with bound records.
// Dependencies: crate::binding, crate::schema, serde, time
// ============================================================================

//! ## Overview
//! Each resource has an explicit serde model. Resources with design-defined
//! data (findings, sections, template translations) decode into a raw form
//! first and bind against a [`crate::schema::ProjectDesign`] on request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::binding::BindError;
use crate::identifiers::TemplateId;

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod finding;
pub mod note;
pub mod project;
pub mod raw;
pub mod section;
pub mod template;
pub mod user;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use finding::Finding;
pub use finding::FindingMeta;
pub use finding::FindingRaw;
pub use note::ProjectNote;
pub use project::Project;
pub use raw::FindingDataRaw;
pub use raw::RawData;
pub use raw::SectionDataRaw;
pub use section::Section;
pub use section::SectionMeta;
pub use section::SectionRaw;
pub use template::FindingTemplate;
pub use template::FindingTemplateTranslation;
pub use user::LockInfo;
pub use user::ProjectMember;
pub use user::User;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Resource decoding and binding errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The response does not match the resource model.
    #[error("invalid {resource} payload: {reason}")]
    Decode {
        /// Resource kind.
        resource: &'static str,
        /// Decoder message.
        reason: String,
    },
    /// The resource could not be serialized.
    #[error("failed to encode {resource}: {reason}")]
    Encode {
        /// Resource kind.
        resource: &'static str,
        /// Encoder message.
        reason: String,
    },
    /// The resource data failed to bind against its design.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// A template has no translation to seed a finding from.
    #[error("finding template {0} has no translations")]
    MissingTranslation(TemplateId),
}
