//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist inserts, deletes and field flushes for `Note` records.
//! - Return the stored collection in insertion order.
//!
//! # Invariants
//! - `list_notes` is ordered by insertion (`position ASC`).
//! - `save_note` is idempotent: an unchanged note writes nothing.
//! - `id` and `created_at` are never rewritten after insert.

use crate::db::{has_notes_table, DbError};
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    AlreadyExists(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "note already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage contract for the notes collection.
pub trait NoteRepository {
    /// Appends one note at the end of the stored order.
    fn insert_note(&mut self, note: &Note) -> RepoResult<()>;
    /// Removes one note permanently.
    fn delete_note(&mut self, id: NoteId) -> RepoResult<()>;
    /// Flushes title/content/updated_at. Returns `false` when nothing changed.
    fn save_note(&mut self, note: &Note) -> RepoResult<bool>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists every stored note in insertion order.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `InvalidData` when the `notes` table is missing (unmigrated connection).
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !has_notes_table(conn)? {
            return Err(RepoError::InvalidData(
                "missing required table `notes`; open the connection through db::open_db"
                    .to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&mut self, note: &Note) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO notes (id, title, content, created_at, updated_at, position)
             VALUES (
                ?1, ?2, ?3, ?4, ?5,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM notes)
             );",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.content.as_str(),
                note.created_at,
                note.updated_at,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::AlreadyExists(note.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_note(&mut self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn save_note(&mut self, note: &Note) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                updated_at = ?4
             WHERE id = ?1
               AND (title <> ?2 OR content <> ?3 OR updated_at <> ?4);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.content.as_str(),
                note.updated_at,
            ],
        )?;

        if changed > 0 {
            return Ok(true);
        }
        if self.note_exists(note.id)? {
            Ok(false)
        } else {
            Err(RepoError::NotFound(note.id))
        }
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY position ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }
}

impl SqliteNoteRepository<'_> {
    fn note_exists(&self, id: NoteId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM notes WHERE id = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id")))?;

    Ok(Note::with_id(
        id,
        row.get::<_, String>("title")?,
        row.get::<_, String>("content")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}
