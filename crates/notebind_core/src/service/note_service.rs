//! Note collection service.
//!
//! # Responsibility
//! - Own the live notes collection as an observable store of shared records.
//! - Provide the search projection plus create/delete/save use-cases.
//!
//! # Invariants
//! - Collection order is insertion order; the search projection never reorders.
//! - Records are shared handles: an edit through any holder is visible to all
//!   holders immediately, `save` only flushes to storage.
//! - Deletion always resolves to note identity before touching storage.
//! - Storage errors are returned to the caller, never discarded.

use crate::model::note::{Note, NoteId};
use crate::model::preview::sample_notes;
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::state::Store;
use log::{error, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shared, observable handle to one note record.
pub type NoteHandle = Store<Note>;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist in storage.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Live notes collection backed by a repository.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    notes: Store<Vec<NoteHandle>>,
}

impl<R: NoteRepository> NoteService<R> {
    /// Loads every stored note into a fresh live collection.
    pub fn load(repo: R) -> NoteServiceResult<Self> {
        let notes = repo
            .list_notes()?
            .into_iter()
            .map(Store::new)
            .collect::<Vec<_>>();
        info!(
            "event=notes_load module=service status=ok count={}",
            notes.len()
        );
        Ok(Self {
            repo,
            notes: Store::new(notes),
        })
    }

    /// Collection store; subscribe to it to re-render on insert/delete.
    pub fn notes_store(&self) -> &Store<Vec<NoteHandle>> {
        &self.notes
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All notes in insertion order.
    pub fn list(&self) -> Vec<NoteHandle> {
        self.notes.get()
    }

    /// Notes matching `query`; see [`filter_notes`].
    pub fn filtered(&self, query: &str) -> Vec<NoteHandle> {
        self.notes.with(|notes| filter_notes(notes, query))
    }

    /// Number of notes in the collection, ignoring any search.
    pub fn count(&self) -> usize {
        self.notes.with(Vec::len)
    }

    /// Looks up the shared handle for `id`.
    pub fn get(&self, id: NoteId) -> Option<NoteHandle> {
        self.notes.with(|notes| {
            notes
                .iter()
                .find(|handle| handle.with(|note| note.id == id))
                .cloned()
        })
    }

    /// Creates a blank note, persists it and appends it to the collection.
    ///
    /// The returned handle is the same instance the collection holds.
    pub fn create(&mut self) -> NoteServiceResult<NoteHandle> {
        self.insert(Note::new())
    }

    /// Persists an existing record (preview seeding, imports) and appends it.
    ///
    /// The collection changes only after the row is written and read back.
    /// When the read-back fails the row stays stored but unlisted; the error is
    /// returned and the next [`NoteService::reload`] picks the row up.
    pub fn insert(&mut self, note: Note) -> NoteServiceResult<NoteHandle> {
        let id = note.id;
        if let Err(err) = self.repo.insert_note(&note) {
            error!("event=note_create module=service status=error id={id} error={err}");
            return Err(err.into());
        }

        let stored = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))?;
        let handle = Store::new(stored);
        self.notes.update(|notes| notes.push(handle.clone()));
        info!(
            "event=note_create module=service status=ok id={id} count={}",
            self.count()
        );
        Ok(handle)
    }

    /// Seeds an empty collection with the preview notes.
    ///
    /// Returns how many notes were inserted; a non-empty collection is left alone.
    pub fn seed_preview(&mut self) -> NoteServiceResult<usize> {
        if self.count() > 0 {
            return Ok(0);
        }
        let samples = sample_notes();
        let inserted = samples.len();
        for note in samples {
            self.insert(note)?;
        }
        Ok(inserted)
    }

    /// Deletes notes by their positions in the projection for `query`.
    ///
    /// Positions are resolved to ids against the filtered ordering first, so
    /// an active search never deletes the wrong record. Out-of-range positions
    /// are ignored. Returns the ids actually deleted.
    pub fn delete_at(
        &mut self,
        query: &str,
        offsets: &BTreeSet<usize>,
    ) -> NoteServiceResult<Vec<NoteId>> {
        let visible = self.filtered(query);
        let ids = offsets
            .iter()
            .filter_map(|&offset| visible.get(offset))
            .map(|handle| handle.with(|note| note.id))
            .collect::<Vec<_>>();
        self.delete_ids(&ids)
    }

    /// Deletes notes by identity, storage first, then the collection.
    ///
    /// On a storage failure the notes already deleted are still removed from
    /// the collection before the error is returned.
    pub fn delete_ids(&mut self, ids: &[NoteId]) -> NoteServiceResult<Vec<NoteId>> {
        let mut deleted = Vec::with_capacity(ids.len());
        let mut failure = None;
        for &id in ids {
            match self.repo.delete_note(id) {
                Ok(()) => deleted.push(id),
                Err(err) => {
                    error!("event=note_delete module=service status=error id={id} error={err}");
                    failure = Some(err);
                    break;
                }
            }
        }

        if !deleted.is_empty() {
            self.notes.update(|notes| {
                notes.retain(|handle| !deleted.contains(&handle.with(|note| note.id)));
            });
            info!(
                "event=note_delete module=service status=ok deleted={} count={}",
                deleted.len(),
                self.count()
            );
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(deleted),
        }
    }

    /// Flushes one record's current fields to storage.
    ///
    /// Returns `false` when storage already matched (idempotent no-op).
    pub fn save(&mut self, handle: &NoteHandle) -> NoteServiceResult<bool> {
        let note = handle.get();
        match self.repo.save_note(&note) {
            Ok(changed) => {
                info!(
                    "event=note_save module=service status=ok id={} changed={changed}",
                    note.id
                );
                Ok(changed)
            }
            Err(err) => {
                error!(
                    "event=note_save module=service status=error id={} error={err}",
                    note.id
                );
                Err(err.into())
            }
        }
    }

    /// Flushes every record; returns how many rows changed.
    pub fn save_all(&mut self) -> NoteServiceResult<usize> {
        let mut changed = 0;
        for handle in self.list() {
            if self.save(&handle)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Re-reads storage into the collection.
    ///
    /// Existing handles are kept for ids that are still stored (so open
    /// editors stay attached) and refreshed with the stored fields.
    pub fn reload(&mut self) -> NoteServiceResult<()> {
        let current = self.list();
        let stored = self.repo.list_notes()?;
        let next = stored
            .into_iter()
            .map(|note| {
                match current
                    .iter()
                    .find(|handle| handle.with(|existing| existing.id == note.id))
                {
                    Some(handle) => {
                        if handle.with(|existing| *existing != note) {
                            handle.set(note);
                        }
                        handle.clone()
                    }
                    None => Store::new(note),
                }
            })
            .collect::<Vec<_>>();
        self.notes.set(next);
        Ok(())
    }
}

/// Stable, case-insensitive search projection over title and content.
///
/// An empty query returns every note in its original order.
pub fn filter_notes(notes: &[NoteHandle], query: &str) -> Vec<NoteHandle> {
    if query.is_empty() {
        return notes.to_vec();
    }
    notes
        .iter()
        .filter(|handle| handle.with(|note| note.matches(query)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_notes;
    use crate::model::note::Note;
    use crate::state::Store;

    fn titles(handles: &[super::NoteHandle]) -> Vec<String> {
        handles.iter().map(|h| h.get().title).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let notes = vec![
            Store::new(Note::with_text("b", "")),
            Store::new(Note::with_text("a", "")),
        ];
        let projected = filter_notes(&notes, "");
        assert_eq!(titles(&projected), vec!["b", "a"]);
        assert!(projected[0].ptr_eq(&notes[0]));
    }

    #[test]
    fn filter_is_case_insensitive_and_order_preserving() {
        let notes = vec![
            Store::new(Note::with_text("Shopping List", "")),
            Store::new(Note::with_text("Meeting Notes", "")),
            Store::new(Note::with_text("Ideas", "todo list")),
        ];
        assert_eq!(
            titles(&filter_notes(&notes, "list")),
            vec!["Shopping List", "Ideas"]
        );
        assert_eq!(
            titles(&filter_notes(&notes, "LIST")),
            vec!["Shopping List", "Ideas"]
        );
    }
}
