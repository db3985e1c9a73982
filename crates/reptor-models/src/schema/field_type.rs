// crates/reptor-models/src/schema/field_type.rs
// ============================================================================
// Module: Field Types
// Description: Closed set of field type tags used by project designs.
// Purpose: Drive validation and nesting dispatch for bound values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every field in a project design carries one of a fixed set of type tags.
//! The tag decides how a raw value is validated and whether the field nests
//! further schemas (`list` and `object`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Field Type
// ============================================================================

/// Type tag of a design field.
///
/// # Invariants
/// - Tags serialize as the lowercase strings used by the SysReptor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// CVSS vector string.
    Cvss,
    /// Plain single-line string.
    String,
    /// Markdown text.
    Markdown,
    /// Ordered list of values sharing the `items` schema.
    List,
    /// Nested object described by `properties`.
    Object,
    /// Selection restricted to the declared choices.
    Enum,
    /// Reference to a user by UUID.
    User,
    /// Free string with suggested values.
    Combobox,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
    /// Integer or floating point number.
    Number,
    /// Boolean flag.
    Boolean,
}

impl FieldType {
    /// All field types in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Cvss,
        Self::String,
        Self::Markdown,
        Self::List,
        Self::Object,
        Self::Enum,
        Self::User,
        Self::Combobox,
        Self::Date,
        Self::Number,
        Self::Boolean,
    ];

    /// Returns the wire tag for the field type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cvss => "cvss",
            Self::String => "string",
            Self::Markdown => "markdown",
            Self::List => "list",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::User => "user",
            Self::Combobox => "combobox",
            Self::Date => "date",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Parses a wire tag, returning `None` for unknown tags.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field_type| field_type.as_str() == tag)
    }

    /// Returns true for types that nest further schemas.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Object)
    }

    /// Returns true for types whose bound value is a string.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(
            self,
            Self::Cvss
                | Self::String
                | Self::Markdown
                | Self::Combobox
                | Self::Enum
                | Self::Date
                | Self::User
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
