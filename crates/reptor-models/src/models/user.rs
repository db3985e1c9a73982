// crates/reptor-models/src/models/user.rs
// ============================================================================
// Module: Users
// Description: SysReptor users, project members, and edit locks.
// Purpose: Typed views of the user objects embedded in API responses.
// Dependencies: crate::identifiers, serde, time
// ============================================================================

//! ## Overview
//! Users appear on their own (`/pentestusers/`) and embedded in projects
//! (members), findings and sections (assignee), and lock records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::identifiers::UserId;

// ============================================================================
// SECTION: Users
// ============================================================================

/// SysReptor user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Academic title shown before the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_before: Option<String>,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Middle name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Academic title shown after the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_after: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Mobile number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Superuser flag.
    #[serde(default)]
    pub is_superuser: bool,
    /// Project admin flag.
    #[serde(default)]
    pub is_project_admin: bool,
    /// Designer flag.
    #[serde(default)]
    pub is_designer: bool,
    /// Template editor flag.
    #[serde(default)]
    pub is_template_editor: bool,
    /// Guest flag.
    #[serde(default)]
    pub is_guest: bool,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated: Option<OffsetDateTime>,
}

impl User {
    /// Returns the display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.username)
    }
}

/// Project member: a user plus project roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Member user.
    #[serde(flatten)]
    pub user: User,
    /// Roles within the project (pentester, reviewer, lead, ...).
    #[serde(default)]
    pub roles: Vec<String>,
}

// ============================================================================
// SECTION: Locks
// ============================================================================

/// Edit lock held on a finding, section, note, or template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Lock holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Lock creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Lock expiry timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub expires: Option<OffsetDateTime>,
}

/// Serde default for flags that are true unless stated otherwise.
const fn default_true() -> bool {
    true
}
