use notebind_core::db::open_db_in_memory;
use notebind_core::{
    Note, NoteRepository, NoteService, NoteServiceError, RepoError, SqliteNoteRepository,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

fn seeded<'a>(conn: &'a Connection, titles: &[&str]) -> NoteService<SqliteNoteRepository<'a>> {
    let mut repo = SqliteNoteRepository::try_new(conn).unwrap();
    for title in titles {
        repo.insert_note(&Note::with_text(*title, "")).unwrap();
    }
    NoteService::load(repo).unwrap()
}

fn titles(service: &NoteService<SqliteNoteRepository<'_>>, query: &str) -> Vec<String> {
    service
        .filtered(query)
        .iter()
        .map(|handle| handle.get().title)
        .collect()
}

#[test]
fn load_lists_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, &["Shopping List", "Meeting Notes", "Ideas"]);
    assert_eq!(
        titles(&service, ""),
        vec!["Shopping List", "Meeting Notes", "Ideas"]
    );
    assert_eq!(service.count(), 3);
}

#[test]
fn filtered_empty_query_equals_list() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, &["b", "a", "c"]);
    let listed = service.list();
    let filtered = service.filtered("");
    assert_eq!(listed.len(), filtered.len());
    assert!(listed
        .iter()
        .zip(filtered.iter())
        .all(|(left, right)| left.ptr_eq(right)));
}

#[test]
fn filtered_is_case_insensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded(&conn, &["Shopping List", "Meeting Notes"]);
    assert_eq!(titles(&service, "list"), vec!["Shopping List"]);
    assert_eq!(titles(&service, "LIST"), vec!["Shopping List"]);
}

#[test]
fn create_appends_unique_note_visible_before_save() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &["one", "two"]);
    let existing = service
        .list()
        .iter()
        .map(|handle| handle.get().id)
        .collect::<HashSet<_>>();

    let created = service.create().unwrap();
    let created_id = created.get().id;

    assert!(!existing.contains(&created_id));
    let listed = service.list();
    assert_eq!(listed.len(), 3);
    assert!(listed[2].ptr_eq(&created));
    assert!(created.get().title.is_empty());
}

#[test]
fn edits_through_handle_are_shared_and_save_persists() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &[]);
    let created = service.create().unwrap();

    created.update(|note| note.title = "Groceries".to_string());
    assert_eq!(service.list()[0].get().title, "Groceries");
    assert_eq!(titles(&service, "groc"), vec!["Groceries"]);

    assert!(service.save(&created).unwrap());
    assert!(!service.save(&created).unwrap());

    let stored = service
        .repository()
        .get_note(created.get().id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "Groceries");
}

#[test]
fn delete_under_filter_removes_filtered_identity() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &["Shopping List", "Meeting Notes", "Ideas"]);

    // "notes" hides underlying position 0; visible position 0 is "Meeting Notes".
    let deleted = service
        .delete_at("notes", &BTreeSet::from([0]))
        .unwrap();

    assert_eq!(deleted.len(), 1);
    assert_eq!(titles(&service, ""), vec!["Shopping List", "Ideas"]);
    let stored = service
        .repository()
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect::<Vec<_>>();
    assert_eq!(stored, vec!["Shopping List", "Ideas"]);
}

#[test]
fn delete_ignores_out_of_range_offsets() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &["a", "b"]);
    let deleted = service.delete_at("", &BTreeSet::from([1, 7])).unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(titles(&service, ""), vec!["a"]);
}

#[test]
fn delete_of_unknown_id_surfaces_not_found() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &["a"]);
    let ghost = Note::new();
    let err = service.delete_ids(&[ghost.id]).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == ghost.id));
    assert_eq!(service.count(), 1);
}

#[test]
fn duplicate_insert_leaves_collection_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &[]);
    let note = Note::with_text("Ideas", "first copy");
    service.insert(note.clone()).unwrap();

    let notifications = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notifications);
    let _ = service
        .notes_store()
        .subscribe(move |_| *counter.borrow_mut() += 1);

    let err = service.insert(note.clone()).unwrap_err();
    assert!(
        matches!(err, NoteServiceError::Repo(RepoError::AlreadyExists(id)) if id == note.id),
        "unexpected error: {err}"
    );
    assert_eq!(service.count(), 1);
    assert_eq!(*notifications.borrow(), 0);
    assert_eq!(service.repository().list_notes().unwrap().len(), 1);
}

#[test]
fn save_of_note_removed_from_storage_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &["a"]);
    let handle = service.list()[0].clone();
    conn.execute("DELETE FROM notes;", []).unwrap();

    let err = service.save(&handle).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
}

#[test]
fn collection_store_notifies_once_per_create_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &[]);
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);
    let _ = service
        .notes_store()
        .subscribe(move |notes| sink.borrow_mut().push(notes.len()));

    let created = service.create().unwrap();
    service.create().unwrap();
    service.delete_ids(&[created.get().id]).unwrap();

    assert_eq!(*counts.borrow(), vec![1, 2, 1]);
}

#[test]
fn reload_keeps_existing_handles_attached() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &["a"]);
    let handle = service.list()[0].clone();
    conn.execute("UPDATE notes SET title = 'from storage';", [])
        .unwrap();

    service.reload().unwrap();

    assert!(service.list()[0].ptr_eq(&handle));
    assert_eq!(handle.get().title, "from storage");
}

#[test]
fn seed_preview_only_fills_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut service = seeded(&conn, &[]);
    assert_eq!(service.seed_preview().unwrap(), 3);
    assert_eq!(service.seed_preview().unwrap(), 0);
    assert_eq!(titles(&service, "list"), vec!["Shopping List"]);
}
