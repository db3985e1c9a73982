// crates/reptor-models/src/models/note.rs
// ============================================================================
// Module: Project Notes
// Description: Markdown notes attached to a project.
// Purpose: Typed note records for listing and uploading notes.
// Dependencies: crate::identifiers, crate::models::user, serde, time
// ============================================================================

//! ## Overview
//! Notes form a tree through `parent`. New notes carry no id until the server
//! creates them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::identifiers::NoteId;
use crate::models::user::LockInfo;

// ============================================================================
// SECTION: Notes
// ============================================================================

/// Project note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNote {
    /// Note identifier; absent until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    /// Parent note.
    #[serde(default)]
    pub parent: Option<NoteId>,
    /// Sort position among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Note title.
    #[serde(default)]
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub text: String,
    /// Checkbox state; `None` hides the checkbox.
    #[serde(default)]
    pub checked: Option<bool>,
    /// Emoji shown as icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    /// Current edit lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_info: Option<LockInfo>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created: Option<OffsetDateTime>,
    /// Last modification timestamp.
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated: Option<OffsetDateTime>,
}

impl ProjectNote {
    /// Creates an empty top-level note.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            parent: None,
            order: None,
            title: title.into(),
            text: String::new(),
            checked: None,
            icon_emoji: None,
            lock_info: None,
            created: None,
            updated: None,
        }
    }

    /// Sets the markdown body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Places the note below `parent`.
    #[must_use]
    pub const fn with_parent(mut self, parent: NoteId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the icon emoji.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon.into());
        self
    }
}
