// crates/reptor-models/src/lib.rs
// ============================================================================
// Module: Reptor Models Library
// Description: Public API surface for the reptor model layer.
// Purpose: Expose design schemas, schema binding, and resource models.
// Dependencies: crate::{binding, identifiers, models, schema}
// ============================================================================

//! ## Overview
//! `reptor-models` turns SysReptor API responses into typed values. Project
//! designs define the fields of findings and report sections at runtime; this
//! crate builds a schema tree from a design, binds finding and section data
//! against it with per-type validation, and serializes the bound data back
//! into request bodies the server accepts.
//!
//! The crate performs no I/O. Callers fetch JSON through their own HTTP
//! client and hand it to [`ProjectDesign::from_json`], [`Finding::from_json`]
//! and [`Section::from_json`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod binding;
pub mod identifiers;
pub mod models;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use binding::BindError;
pub use binding::BindMode;
pub use binding::BoundField;
pub use binding::BoundRecord;
pub use binding::BoundValue;
pub use binding::FieldError;
pub use binding::FieldIter;
pub use binding::FindingData;
pub use binding::SectionData;
pub use identifiers::FindingId;
pub use identifiers::NoteId;
pub use identifiers::ProjectDesignId;
pub use identifiers::ProjectId;
pub use identifiers::SectionId;
pub use identifiers::TemplateId;
pub use identifiers::TranslationId;
pub use identifiers::UserId;
pub use models::Finding;
pub use models::FindingDataRaw;
pub use models::FindingMeta;
pub use models::FindingRaw;
pub use models::FindingTemplate;
pub use models::FindingTemplateTranslation;
pub use models::LockInfo;
pub use models::ModelError;
pub use models::Project;
pub use models::ProjectMember;
pub use models::ProjectNote;
pub use models::RawData;
pub use models::Section;
pub use models::SectionDataRaw;
pub use models::SectionMeta;
pub use models::SectionRaw;
pub use models::User;
pub use schema::DesignScope;
pub use schema::FieldChoice;
pub use schema::FieldOrigin;
pub use schema::FieldSchema;
pub use schema::FieldType;
pub use schema::ProjectDesign;
pub use schema::SchemaError;
