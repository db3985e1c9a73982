// crates/reptor-models/src/binding/mod.rs
// ============================================================================
// Module: Schema Binding
// Description: Validated pairing of raw JSON data with design field schemas.
// Purpose: Give findings and sections typed, re-validating field access.
// Dependencies: crate::schema, serde_json, time, tracing, uuid
// ============================================================================

//! ## Overview
//! Binding turns the raw `data` object of a finding or section into a tree of
//! [`BoundField`]s whose values are guaranteed to match their schema, and
//! serializes the tree back into the JSON body the API expects.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod field;
pub mod record;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use field::BindMode;
pub use field::BoundField;
pub use field::BoundValue;
pub use field::FieldError;
pub use field::FieldIter;
pub use record::BindError;
pub use record::BoundRecord;
pub use record::FindingData;
pub use record::SectionData;
