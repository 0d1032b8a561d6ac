//! Domain model for the notes application.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its identity type.
//! - Provide fixture data for previews and demos.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reused.
//! - `created_at` is set once at creation and never changed.

pub mod note;
pub mod preview;
