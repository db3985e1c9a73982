// crates/reptor-models/src/identifiers.rs
// ============================================================================
// Module: Reptor Identifiers
// Description: Typed identifiers for SysReptor resources.
// Purpose: Keep ids of different resource kinds from being mixed up.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! SysReptor addresses most resources by UUID. Report sections are the
//! exception: they are addressed by a slug chosen in the project design
//! (for example `executive_summary`). All identifiers serialize as plain
//! strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// SECTION: UUID Identifiers
// ============================================================================

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID.
            #[must_use]
            pub const fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_identifier!(
    /// Project identifier.
    ProjectId
);
uuid_identifier!(
    /// Project design identifier.
    ProjectDesignId
);
uuid_identifier!(
    /// Finding identifier.
    FindingId
);
uuid_identifier!(
    /// Finding template identifier.
    TemplateId
);
uuid_identifier!(
    /// Finding template translation identifier.
    TranslationId
);
uuid_identifier!(
    /// User identifier.
    UserId
);
uuid_identifier!(
    /// Project note identifier.
    NoteId
);

// ============================================================================
// SECTION: Section Identifier
// ============================================================================

/// Report section identifier (a design-defined slug, not a UUID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Creates a new section identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
