//! Fixture notes for previews, demos and tests.

use super::note::Note;

/// The three sample notes used to seed preview stores.
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note::with_text("Shopping List", "Milk, Eggs, Bread, Butter"),
        Note::with_text("Meeting Notes", "Discuss Q3 roadmap, budget updates"),
        Note::with_text("Ideas", "Build a note app with a reactive store!"),
    ]
}
