use std::collections::HashMap;

use uuid::Uuid;

use studydeck_lib::flashcards::{Flashcard, ReviewSession};
use studydeck_lib::notes::Note;

pub struct StudyState {
    pub session: ReviewSession,
    /// Source note titles by note id
    pub note_titles: HashMap<Uuid, String>,
    /// Outcome of the previous answer, shown until the next key press
    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl StudyState {
    pub fn new(session: ReviewSession, notes: &[Note]) -> Self {
        Self {
            session,
            note_titles: notes.iter().map(|n| (n.id, n.title.clone())).collect(),
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.session.current()
    }

    pub fn source_title(&self, card: &Flashcard) -> &str {
        self.note_titles
            .get(&card.note_id)
            .map(String::as_str)
            .unwrap_or("Unknown note")
    }
}
