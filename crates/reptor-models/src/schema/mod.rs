// crates/reptor-models/src/schema/mod.rs
// ============================================================================
// Module: Design Schemas
// Description: Field type tags, field schemas, and project designs.
// Purpose: Turn server-defined designs into a typed schema tree.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! The schema tree is built once per project design and reused for every
//! finding and section bound against it.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod design;
pub mod field;
pub mod field_type;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use design::DesignScope;
pub use design::ProjectDesign;
pub use field::FieldChoice;
pub use field::FieldOrigin;
pub use field::FieldSchema;
pub use field::SchemaError;
pub use field_type::FieldType;
