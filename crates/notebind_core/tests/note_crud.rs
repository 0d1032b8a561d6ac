use notebind_core::db::open_db_in_memory;
use notebind_core::{Note, NoteRepository, RepoError, SqliteNoteRepository};
use uuid::Uuid;

#[test]
fn insert_and_list_preserve_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let first = Note::with_text("Shopping List", "Milk");
    let second = Note::with_text("Meeting Notes", "Q3");
    let third = Note::with_text("Ideas", "");
    for note in [&first, &second, &third] {
        repo.insert_note(note).unwrap();
    }

    let listed = repo.list_notes().unwrap();
    let ids = listed.iter().map(|note| note.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert_eq!(listed[0], first);
}

#[test]
fn save_is_idempotent_and_reports_changes() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let mut note = Note::new();
    repo.insert_note(&note).unwrap();

    assert!(!repo.save_note(&note).unwrap());

    note.title = "Groceries".to_string();
    assert!(repo.save_note(&note).unwrap());
    assert!(!repo.save_note(&note).unwrap());

    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert_eq!(loaded.title, "Groceries");
    assert_eq!(loaded.created_at, note.created_at);
}

#[test]
fn save_does_not_rewrite_created_at() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let note = Note::with_id(Uuid::new_v4(), "t", "c", 1_000, 1_000);
    repo.insert_note(&note).unwrap();

    let mut edited = note.clone();
    edited.created_at = 9_999;
    edited.content = "changed".to_string();
    repo.save_note(&edited).unwrap();

    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert_eq!(loaded.created_at, 1_000);
    assert_eq!(loaded.content, "changed");
}

#[test]
fn save_and_delete_of_missing_note_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let ghost = Note::new();

    assert!(matches!(
        repo.save_note(&ghost),
        Err(RepoError::NotFound(id)) if id == ghost.id
    ));
    assert!(matches!(
        repo.delete_note(ghost.id),
        Err(RepoError::NotFound(id)) if id == ghost.id
    ));
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let note = Note::with_text("gone", "");
    repo.insert_note(&note).unwrap();

    repo.delete_note(note.id).unwrap();
    assert!(repo.get_note(note.id).unwrap().is_none());
    assert!(repo.list_notes().unwrap().is_empty());
}

#[test]
fn corrupt_id_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (id, title, content, created_at, updated_at, position)
         VALUES ('not-a-uuid', '', '', 0, 0, 0);",
        [],
    )
    .unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let err = repo.list_notes().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn note_serializes_with_snake_case_fields() {
    let note = Note::with_id(Uuid::nil(), "Ideas", "body", 1, 2);
    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["title"], "Ideas");
    assert_eq!(value["created_at"], 1);
    assert_eq!(value["updated_at"], 2);

    let back: Note = serde_json::from_value(value).unwrap();
    assert_eq!(back, note);
}
