//! Notes list screen state.
//!
//! # Responsibility
//! - Own search text, navigation path and keyboard state for the list.
//! - Drive the `Viewing -> Editing -> Viewing` flow on top of `NoteService`.
//!
//! # Invariants
//! - Swipe-delete positions are interpreted against the visible (filtered)
//!   ordering and resolved to ids before anything is deleted.
//! - `done` surfaces save errors and keeps the editor open when saving fails.

use super::keyboard::KeyboardVisibility;
use super::note_detail::NoteDetailModel;
use crate::model::note::NoteId;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteHandle, NoteService, NoteServiceResult};
use crate::state::{Binding, Store};
use std::collections::BTreeSet;

/// Which screen of the flow is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Viewing,
    Editing(NoteId),
}

/// State behind the notes list and its navigation stack.
pub struct NotesListModel<R: NoteRepository> {
    service: NoteService<R>,
    search_text: Store<String>,
    path: Store<Vec<NoteId>>,
    keyboard: KeyboardVisibility,
}

impl<R: NoteRepository> NotesListModel<R> {
    pub fn new(service: NoteService<R>) -> Self {
        Self {
            service,
            search_text: Store::new(String::new()),
            path: Store::new(Vec::new()),
            keyboard: KeyboardVisibility::new(),
        }
    }

    pub fn service(&self) -> &NoteService<R> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut NoteService<R> {
        &mut self.service
    }

    /// Search field binding.
    pub fn search_text(&self) -> Binding<String> {
        self.search_text.binding()
    }

    /// Navigation stack of open note ids.
    pub fn path(&self) -> &Store<Vec<NoteId>> {
        &self.path
    }

    pub fn keyboard(&self) -> &KeyboardVisibility {
        &self.keyboard
    }

    /// Rows currently displayed, honoring the search text.
    pub fn visible_notes(&self) -> Vec<NoteHandle> {
        self.search_text
            .with(|query| self.service.filtered(query.as_str()))
    }

    /// Footer count, always over the full collection.
    pub fn footer_label(&self) -> String {
        format!("{} Notes", self.service.count())
    }

    /// The footer is hidden while the keyboard is up.
    pub fn footer_visible(&self) -> bool {
        !self.keyboard.is_visible()
    }

    pub fn mode(&self) -> ListMode {
        match self.path.with(|path| path.last().copied()) {
            Some(id) => ListMode::Editing(id),
            None => ListMode::Viewing,
        }
    }

    /// Creates a blank note and navigates straight into its editor.
    pub fn compose(&mut self) -> NoteServiceResult<NoteDetailModel> {
        let handle = self.service.create()?;
        let id = handle.with(|note| note.id);
        self.path.update(|path| path.push(id));
        Ok(NoteDetailModel::new(&handle))
    }

    /// Navigates into the editor for `id`; `None` when it is not in the list.
    pub fn open(&mut self, id: NoteId) -> Option<NoteDetailModel> {
        let handle = self.service.get(id)?;
        self.path.update(|path| path.push(id));
        Some(NoteDetailModel::new(&handle))
    }

    /// Editor for the note on top of the navigation stack.
    pub fn current_detail(&self) -> Option<NoteDetailModel> {
        match self.mode() {
            ListMode::Editing(id) => self.service.get(id).map(|h| NoteDetailModel::new(&h)),
            ListMode::Viewing => None,
        }
    }

    /// Saves the open note and pops back to the list.
    ///
    /// A note deleted while open is simply popped.
    pub fn done(&mut self) -> NoteServiceResult<()> {
        let ListMode::Editing(id) = self.mode() else {
            return Ok(());
        };
        if let Some(handle) = self.service.get(id) {
            self.service.save(&handle)?;
        }
        self.path.update(|path| {
            path.pop();
        });
        Ok(())
    }

    /// Deletes rows by their visible positions.
    pub fn delete_visible(&mut self, offsets: &BTreeSet<usize>) -> NoteServiceResult<Vec<NoteId>> {
        let query = self.search_text.get();
        let deleted = self.service.delete_at(query.as_str(), offsets)?;
        if !deleted.is_empty() {
            self.path
                .update(|path| path.retain(|id| !deleted.contains(id)));
        }
        Ok(deleted)
    }
}
