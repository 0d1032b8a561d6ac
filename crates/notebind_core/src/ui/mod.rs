//! View models built on the state primitives.
//!
//! # Responsibility
//! - Hold the per-screen state of the notes list/detail flow.
//! - Reproduce the small binding exercises (counter, toggle, observed view
//!   model, nested field editing) as plain types.
//!
//! # Invariants
//! - View models never render; a UI layer subscribes to their stores and
//!   re-derives its display from current values.

pub mod exercises;
pub mod keyboard;
pub mod note_detail;
pub mod notes_list;
