//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by list and detail views.
//! - Provide the case-insensitive match rule used by the search projection.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` never changes after construction.
//! - `updated_at` is carried as stored; edits do not touch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every note.
pub type NoteId = Uuid;

const CREATED_LABEL_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with a fresh id, stamped with the current time.
    pub fn new() -> Self {
        Self::with_text("", "")
    }

    /// Creates a note with initial text, stamped with the current time.
    pub fn with_text(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self::with_id(Uuid::new_v4(), title, content, now, now)
    }

    /// Rebuilds a note whose identity already exists (storage read-back, imports).
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at,
        }
    }

    /// Whether `query` occurs in title or content, ignoring case.
    ///
    /// A blank query matches every note.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }

    /// Creation time rendered for list rows and the detail header (UTC).
    pub fn created_label(&self) -> String {
        match DateTime::<Utc>::from_timestamp_millis(self.created_at) {
            Some(at) => at.format(CREATED_LABEL_FORMAT).to_string(),
            None => String::new(),
        }
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
