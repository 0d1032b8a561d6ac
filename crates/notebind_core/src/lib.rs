//! Core of the notebind notes app.
//!
//! Observable stores, lens bindings and scoped shared state, plus the notes
//! collection they drive and its SQLite persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;
pub mod ui;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{
    filter_notes, NoteHandle, NoteService, NoteServiceError, NoteServiceResult,
};
pub use state::{Binding, Lens, Scope, Store, Subscription, WeakStore};
pub use ui::note_detail::{DetailError, NoteDetailModel};
pub use ui::notes_list::{ListMode, NotesListModel};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
