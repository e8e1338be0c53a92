//! Notes storage implementation

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::*;
use crate::ai::ContentGenerator;
use crate::storage::{Result, StorageError, StorageKey, StudyStore};

/// Storage for notes
#[derive(Clone)]
pub struct NotesStorage {
    store: StudyStore,
}

impl NotesStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    // ===== Note CRUD Operations =====

    /// List all notes, newest first as stored
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        self.store.load_collection(StorageKey::Notes)
    }

    /// Get a note by ID
    pub fn get_note(&self, id: Uuid) -> Result<Note> {
        self.list_notes()?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Note {} not found", id)))
    }

    /// Create a new note at the front of the list
    pub fn create_note(&self, draft: NoteDraft, now: DateTime<Utc>) -> Result<Note> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StorageError::Validation(
                "Please enter a title for your note".to_string(),
            ));
        }

        let category = draft.category.trim();
        let note = Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: draft.content.trim().to_string(),
            summary: non_empty(draft.summary),
            tags: clean_tags(draft.tags),
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            created_at: now,
            updated_at: now,
            audio_url: None,
            is_starred: false,
            version: 1,
            is_archived: false,
        };

        self.insert_front(note)
    }

    /// Replace the editable fields of a note
    pub fn update_note(&self, id: Uuid, draft: NoteDraft, now: DateTime<Utc>) -> Result<Note> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StorageError::Validation(
                "Please enter a title for your note".to_string(),
            ));
        }

        let mut notes = self.list_notes()?;
        let note = find_mut(&mut notes, id)?;

        note.title = title.to_string();
        note.content = draft.content.trim().to_string();
        if !draft.category.trim().is_empty() {
            note.category = draft.category.trim().to_string();
        }
        note.tags = clean_tags(draft.tags);
        note.summary = non_empty(draft.summary);
        note.updated_at = now;
        note.version += 1;

        let updated = note.clone();
        self.save_notes(&notes)?;
        Ok(updated)
    }

    /// Delete a note
    pub fn delete_note(&self, id: Uuid) -> Result<()> {
        let mut notes = self.list_notes()?;
        let len_before = notes.len();
        notes.retain(|n| n.id != id);

        if notes.len() == len_before {
            return Err(StorageError::NotFound(format!("Note {} not found", id)));
        }

        self.save_notes(&notes)
    }

    /// Flip the starred flag
    pub fn toggle_star(&self, id: Uuid) -> Result<Note> {
        self.modify(id, |note| note.is_starred = !note.is_starred)
    }

    /// Archive or restore a note
    pub fn set_archived(&self, id: Uuid, archived: bool) -> Result<Note> {
        self.modify(id, |note| note.is_archived = archived)
    }

    /// Notes matching a query, sorted as requested
    pub fn search(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .list_notes()?
            .into_iter()
            .filter(|n| query.matches(n))
            .collect();

        match query.sort {
            NoteSort::Date => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            NoteSort::Title => notes.sort_by(|a, b| a.title.cmp(&b.title)),
            NoteSort::Category => notes.sort_by(|a, b| a.category.cmp(&b.category)),
        }

        Ok(notes)
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for note in self.list_notes()? {
            if !categories.contains(&note.category) {
                categories.push(note.category);
            }
        }
        Ok(categories)
    }

    // ===== Generated Content =====

    /// Summarize a note's content and store the result on the note
    pub async fn summarize_note(&self, id: Uuid, generator: &dyn ContentGenerator) -> Result<Note> {
        let note = self.get_note(id)?;
        let summary = generator.summarize_text(&note.content).await?;
        self.modify(id, |note| note.summary = Some(summary))
    }

    /// Save a transcribed recording as a new note
    pub fn save_transcription(
        &self,
        title: Option<&str>,
        transcription: &str,
        category: Option<&str>,
        tags: Vec<String>,
        audio_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Note> {
        let transcription = transcription.trim();
        if transcription.is_empty() {
            return Err(StorageError::Validation(
                "Please transcribe the audio first".to_string(),
            ));
        }

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Audio Note - {}", now.format("%Y-%m-%d")));
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(AUDIO_CATEGORY)
            .to_string();

        let note = Note {
            id: Uuid::new_v4(),
            title,
            content: transcription.to_string(),
            summary: None,
            tags: clean_tags(tags),
            category,
            created_at: now,
            updated_at: now,
            audio_url,
            is_starred: false,
            version: 1,
            is_archived: false,
        };

        self.insert_front(note)
    }

    // ===== Helpers =====

    fn insert_front(&self, note: Note) -> Result<Note> {
        let mut notes = self.list_notes()?;
        notes.insert(0, note.clone());
        self.save_notes(&notes)?;

        log::info!("Created note {} ({})", note.id, note.title);
        Ok(note)
    }

    fn modify<F: FnOnce(&mut Note)>(&self, id: Uuid, change: F) -> Result<Note> {
        let mut notes = self.list_notes()?;
        let note = find_mut(&mut notes, id)?;
        change(note);

        let updated = note.clone();
        self.save_notes(&notes)?;
        Ok(updated)
    }

    fn save_notes(&self, notes: &[Note]) -> Result<()> {
        self.store.save_collection(StorageKey::Notes, notes)
    }
}

fn find_mut(notes: &mut [Note], id: Uuid) -> Result<&mut Note> {
    notes
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or_else(|| StorageError::NotFound(format!("Note {} not found", id)))
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !cleaned.contains(&tag) {
            cleaned.push(tag);
        }
    }
    cleaned
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockContentGenerator;
    use chrono::Duration;

    fn create_test_storage() -> NotesStorage {
        NotesStorage::new(StudyStore::in_memory())
    }

    fn draft(title: &str, content: &str, category: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_note_defaults() {
        let storage = create_test_storage();
        let note = storage
            .create_note(draft("  Cell Biology ", "Cells", ""), Utc::now())
            .unwrap();

        assert_eq!(note.title, "Cell Biology");
        assert_eq!(note.category, DEFAULT_CATEGORY);
        assert_eq!(note.version, 1);
        assert!(!note.is_starred);
        assert_eq!(storage.get_note(note.id).unwrap(), note);
    }

    #[test]
    fn test_create_note_requires_title() {
        let storage = create_test_storage();
        let result = storage.create_note(draft("   ", "body", "Math"), Utc::now());

        assert!(matches!(result, Err(StorageError::Validation(_))));
        assert!(storage.list_notes().unwrap().is_empty());
    }

    #[test]
    fn test_new_notes_go_first() {
        let storage = create_test_storage();
        let first = storage.create_note(draft("First", "", ""), Utc::now()).unwrap();
        let second = storage.create_note(draft("Second", "", ""), Utc::now()).unwrap();

        let notes = storage.list_notes().unwrap();
        assert_eq!(notes[0].id, second.id);
        assert_eq!(notes[1].id, first.id);
    }

    #[test]
    fn test_update_note_bumps_version() {
        let storage = create_test_storage();
        let created_at = Utc::now();
        let note = storage.create_note(draft("Draft", "v1", "Math"), created_at).unwrap();

        let later = created_at + Duration::minutes(5);
        let mut changes = draft("Final", "v2", "");
        changes.tags = vec!["algebra".to_string(), " algebra ".to_string(), "".to_string()];
        let updated = storage.update_note(note.id, changes, later).unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.category, "Math");
        assert_eq!(updated.tags, vec!["algebra".to_string()]);
        assert_eq!(updated.version, 2);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, created_at);
    }

    #[test]
    fn test_toggle_star_and_delete() {
        let storage = create_test_storage();
        let note = storage.create_note(draft("Star me", "", ""), Utc::now()).unwrap();

        assert!(storage.toggle_star(note.id).unwrap().is_starred);
        assert!(!storage.toggle_star(note.id).unwrap().is_starred);

        storage.delete_note(note.id).unwrap();
        assert!(storage.get_note(note.id).is_err());
        assert!(storage.delete_note(note.id).is_err());
    }

    #[test]
    fn test_search_and_sort() {
        let storage = create_test_storage();
        let t0 = Utc::now();
        storage.create_note(draft("Zebra facts", "stripes", "Biology"), t0).unwrap();
        let mut tagged = draft("Algebra", "equations", "Math");
        tagged.tags = vec!["Exam".to_string()];
        storage.create_note(tagged, t0 + Duration::seconds(1)).unwrap();
        storage.create_note(draft("Cells", "membrane", "Biology"), t0 + Duration::seconds(2)).unwrap();

        let by_date = storage.search(&NoteQuery::default()).unwrap();
        assert_eq!(by_date[0].title, "Cells");

        let by_title = storage
            .search(&NoteQuery { sort: NoteSort::Title, ..Default::default() })
            .unwrap();
        let titles: Vec<&str> = by_title.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Algebra", "Cells", "Zebra facts"]);

        let by_tag = storage
            .search(&NoteQuery { text: Some("exam".to_string()), ..Default::default() })
            .unwrap();
        assert_eq!(by_tag.len(), 1);

        let biology = storage
            .search(&NoteQuery { category: Some("biology".to_string()), ..Default::default() })
            .unwrap();
        assert_eq!(biology.len(), 2);

        assert_eq!(storage.categories().unwrap(), vec!["Biology", "Math"]);
    }

    #[test]
    fn test_archived_notes_hidden_by_default() {
        let storage = create_test_storage();
        let note = storage.create_note(draft("Old", "", ""), Utc::now()).unwrap();
        storage.set_archived(note.id, true).unwrap();

        assert!(storage.search(&NoteQuery::default()).unwrap().is_empty());
        let all = storage
            .search(&NoteQuery { include_archived: true, ..Default::default() })
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_save_transcription_defaults() {
        let storage = create_test_storage();
        let now = Utc::now();
        let note = storage
            .save_transcription(None, " spoken words ", None, Vec::new(), None, now)
            .unwrap();

        assert_eq!(note.title, format!("Audio Note - {}", now.format("%Y-%m-%d")));
        assert_eq!(note.category, AUDIO_CATEGORY);
        assert_eq!(note.content, "spoken words");

        let empty = storage.save_transcription(Some("x"), "  ", None, Vec::new(), None, now);
        assert!(matches!(empty, Err(StorageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_summarize_note_stores_summary() {
        let storage = create_test_storage();
        let note = storage
            .create_note(draft("Physics", "Force is mass times acceleration. Energy is conserved.", ""), Utc::now())
            .unwrap();

        let summarized = storage
            .summarize_note(note.id, &MockContentGenerator::instant())
            .await
            .unwrap();

        assert_eq!(
            summarized.summary.as_deref(),
            Some("Key points: Force is mass times acceleration. Energy is conserved.")
        );
        assert_eq!(storage.get_note(note.id).unwrap().summary, summarized.summary);
    }
}
