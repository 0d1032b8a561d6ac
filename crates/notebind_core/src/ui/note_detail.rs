//! Detail editor for one note.
//!
//! # Responsibility
//! - Expose live title/content bindings into a shared note record.
//! - Track scroll offset for the pull-down creation date header.
//!
//! # Invariants
//! - The editor holds only a weak handle; it never keeps a deleted note alive.
//! - Every keystroke written through a binding is immediately visible to the
//!   list; persistence happens only on an explicit save.

use crate::model::note::{Note, NoteId};
use crate::service::note_service::NoteHandle;
use crate::state::{Binding, Store, WeakStore};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scroll distance past which the creation date header is revealed.
pub const CREATED_LABEL_REVEAL_OFFSET: f64 = 20.0;

/// Detail editor errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    /// The record was deleted while the editor was open.
    NoteGone(NoteId),
}

impl Display for DetailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteGone(id) => write!(f, "note {id} is no longer in the collection"),
        }
    }
}

impl Error for DetailError {}

/// Editor state for one open note.
pub struct NoteDetailModel {
    id: NoteId,
    note: WeakStore<Note>,
    scroll_offset: Store<f64>,
}

impl NoteDetailModel {
    /// Opens an editor on a shared record.
    pub fn new(handle: &NoteHandle) -> Self {
        Self {
            id: handle.with(|note| note.id),
            note: handle.downgrade(),
            scroll_offset: Store::new(0.0),
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.id
    }

    /// Strong handle while the record is still owned by the collection.
    pub fn handle(&self) -> Result<NoteHandle, DetailError> {
        self.note.upgrade().ok_or(DetailError::NoteGone(self.id))
    }

    /// Binding onto the whole record.
    ///
    /// Reads fall back to the snapshot taken here once the record is gone;
    /// writes after deletion are dropped.
    pub fn note(&self) -> Result<Binding<Note>, DetailError> {
        let fallback = self.handle()?.get();
        let reader = self.note.clone();
        let writer = self.note.clone();
        Ok(Binding::new(
            move || {
                reader
                    .upgrade()
                    .map(|store| store.get())
                    .unwrap_or_else(|| fallback.clone())
            },
            move |note| {
                if let Some(store) = writer.upgrade() {
                    store.set(note);
                }
            },
        ))
    }

    /// Title text field binding.
    pub fn title(&self) -> Result<Binding<String>, DetailError> {
        Ok(self
            .note()?
            .field(|note| note.title.clone(), |note, title| note.title = title))
    }

    /// Content editor binding.
    pub fn content(&self) -> Result<Binding<String>, DetailError> {
        Ok(self.note()?.field(
            |note| note.content.clone(),
            |note, content| note.content = content,
        ))
    }

    /// Records the current scroll offset.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.scroll_offset.set(offset);
    }

    pub fn scroll_offset(&self) -> &Store<f64> {
        &self.scroll_offset
    }

    /// Whether the creation date header is pulled into view.
    pub fn shows_created_label(&self) -> bool {
        self.scroll_offset.get() > CREATED_LABEL_REVEAL_OFFSET
    }

    /// Creation date text for the header.
    pub fn created_label(&self) -> Result<String, DetailError> {
        Ok(self.handle()?.with(Note::created_label))
    }
}
