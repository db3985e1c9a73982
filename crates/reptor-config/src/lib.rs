// crates/reptor-config/src/lib.rs
// ============================================================================
// Module: Reptor Config Library
// Description: Client configuration model, loading, and validation.
// Purpose: Single source of truth for the reptor config.yaml semantics.
// Dependencies: reptor-models, serde, serde_yaml, url
// ============================================================================

//! ## Overview
//! `reptor-config` loads the client configuration shared with the reptor CLI
//! (`~/.sysreptor/config.yaml`), applies environment overrides, and validates
//! the result fail-closed before any request is made.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
