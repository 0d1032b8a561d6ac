//! Repository layer for durable note storage.
//!
//! # Responsibility
//! - Define the storage contract the notes service depends on.
//! - Isolate SQLite query details from the in-memory collection.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`) in
//!   addition to DB transport errors; no failure is swallowed.

pub mod note_repo;
