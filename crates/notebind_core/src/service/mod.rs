//! Core use-case services.
//!
//! # Responsibility
//! - Keep the live in-memory notes collection in step with durable storage.
//! - Keep view models decoupled from storage details.

pub mod note_service;
