//! Storage operations for flashcards
//!
//! All cards live in one collection under `ai-study-flashcards`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::*;
use super::scheduler::{due_cards, is_due, review_card};
use crate::ai::ContentGenerator;
use crate::notes::Note;
use crate::storage::{Result, StorageError, StorageKey, StudyStore};

/// Storage manager for flashcard operations
#[derive(Clone)]
pub struct FlashcardStorage {
    store: StudyStore,
}

impl FlashcardStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    // ==================== Card Operations ====================

    /// List all cards
    pub fn list_cards(&self) -> Result<Vec<Flashcard>> {
        self.store.load_collection(StorageKey::Flashcards)
    }

    /// Get a specific card
    pub fn get_card(&self, card_id: Uuid) -> Result<Flashcard> {
        self.list_cards()?
            .into_iter()
            .find(|c| c.id == card_id)
            .ok_or_else(|| StorageError::NotFound(format!("Flashcard {} not found", card_id)))
    }

    /// Cards matching a filter, in storage order
    pub fn filter(&self, filter: &FlashcardFilter) -> Result<Vec<Flashcard>> {
        Ok(self
            .list_cards()?
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect())
    }

    /// Generate cards from a note and append them to the collection
    pub async fn generate_for_note(
        &self,
        note: &Note,
        generator: &dyn ContentGenerator,
        now: DateTime<Utc>,
    ) -> Result<Vec<Flashcard>> {
        let generated = generator.generate_flashcards(&note.content).await?;

        let new_cards: Vec<Flashcard> = generated
            .into_iter()
            .map(|g| Flashcard::new(note.id, g.question, g.answer, note.tags.clone(), now))
            .collect();

        let mut cards = self.list_cards()?;
        cards.extend(new_cards.iter().cloned());
        self.save_cards(&cards)?;

        log::info!("Generated {} flashcards from note {}", new_cards.len(), note.id);
        Ok(new_cards)
    }

    /// Delete a card
    pub fn delete_card(&self, card_id: Uuid) -> Result<()> {
        let mut cards = self.list_cards()?;
        let len_before = cards.len();
        cards.retain(|c| c.id != card_id);

        if cards.len() == len_before {
            return Err(StorageError::NotFound(format!("Flashcard {} not found", card_id)));
        }

        self.save_cards(&cards)
    }

    fn save_cards(&self, cards: &[Flashcard]) -> Result<()> {
        self.store.save_collection(StorageKey::Flashcards, cards)
    }

    // ==================== Review Operations ====================

    /// All due cards, in storage order
    pub fn due_cards(&self, now: DateTime<Utc>) -> Result<Vec<Flashcard>> {
        Ok(due_cards(&self.list_cards()?, now))
    }

    /// Submit a review for a card
    pub fn submit_review(&self, card_id: Uuid, is_correct: bool, now: DateTime<Utc>) -> Result<Flashcard> {
        let mut cards = self.list_cards()?;
        let card = cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| StorageError::NotFound(format!("Flashcard {} not found", card_id)))?;

        *card = review_card(card, is_correct, now);
        let updated = card.clone();
        self.save_cards(&cards)?;

        Ok(updated)
    }

    /// Write back the cards reviewed during a study session.
    ///
    /// Cards that are not part of `updated` keep their stored state.
    pub fn apply_session(&self, updated: &[Flashcard]) -> Result<usize> {
        let by_id: HashMap<Uuid, &Flashcard> = updated.iter().map(|c| (c.id, c)).collect();
        let mut cards = self.list_cards()?;
        let mut applied = 0;

        for card in cards.iter_mut() {
            if let Some(new_state) = by_id.get(&card.id) {
                *card = (*new_state).clone();
                applied += 1;
            }
        }

        self.save_cards(&cards)?;
        Ok(applied)
    }

    /// Get review statistics over all cards
    pub fn stats(&self, now: DateTime<Utc>) -> Result<FlashcardStats> {
        let cards = self.list_cards()?;

        let mut stats = FlashcardStats {
            total: cards.len(),
            ..Default::default()
        };

        for card in &cards {
            match card.difficulty {
                Difficulty::Easy => stats.easy += 1,
                Difficulty::Medium => stats.medium += 1,
                Difficulty::Hard => stats.hard += 1,
            }
            if is_due(card, now) {
                stats.due += 1;
            }
        }

        if !cards.is_empty() {
            let sum: f64 = cards.iter().map(Flashcard::accuracy).sum();
            stats.average_accuracy = (sum / cards.len() as f64 * 100.0).round() as u32;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockContentGenerator;
    use crate::notes::{NoteDraft, NotesStorage};
    use chrono::Duration;

    fn create_test_storage() -> (FlashcardStorage, NotesStorage) {
        let store = StudyStore::in_memory();
        (FlashcardStorage::new(store.clone()), NotesStorage::new(store))
    }

    fn sample_note(notes: &NotesStorage) -> Note {
        let draft = NoteDraft {
            title: "Biology".to_string(),
            content: "Mitochondria produce energy through respiration".to_string(),
            tags: vec!["cells".to_string()],
            ..Default::default()
        };
        notes.create_note(draft, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_for_note() {
        let (storage, notes) = create_test_storage();
        let note = sample_note(&notes);
        let now = Utc::now();

        let cards = storage
            .generate_for_note(&note, &MockContentGenerator::instant(), now)
            .await
            .unwrap();

        // Mitochondria, produce, energy, through, respiration
        assert_eq!(cards.len(), 5);
        for card in &cards {
            assert_eq!(card.note_id, note.id);
            assert_eq!(card.difficulty, Difficulty::Medium);
            assert_eq!(card.next_review, now);
            assert_eq!(card.review_count, 0);
            assert_eq!(card.tags, vec!["cells".to_string()]);
        }
        assert_eq!(storage.list_cards().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_review_persists() {
        let (storage, notes) = create_test_storage();
        let note = sample_note(&notes);
        let now = Utc::now();
        let cards = storage
            .generate_for_note(&note, &MockContentGenerator::instant(), now)
            .await
            .unwrap();

        let updated = storage.submit_review(cards[0].id, false, now).unwrap();
        assert_eq!(updated.difficulty, Difficulty::Hard);

        let stored = storage.get_card(cards[0].id).unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.next_review, now + Duration::days(1));
    }

    #[test]
    fn test_submit_review_unknown_card() {
        let (storage, _) = create_test_storage();
        let result = storage.submit_review(Uuid::new_v4(), true, Utc::now());
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_apply_session_leaves_other_cards() {
        let (storage, notes) = create_test_storage();
        let note = sample_note(&notes);
        let now = Utc::now();
        let cards = storage
            .generate_for_note(&note, &MockContentGenerator::instant(), now)
            .await
            .unwrap();

        let reviewed = review_card(&cards[2], true, now);
        assert_eq!(storage.apply_session(&[reviewed.clone()]).unwrap(), 1);

        let stored = storage.list_cards().unwrap();
        assert_eq!(stored[2], reviewed);
        assert_eq!(stored[0], cards[0]);
        assert_eq!(stored.len(), cards.len());
    }

    #[tokio::test]
    async fn test_stats_and_due() {
        let (storage, notes) = create_test_storage();
        let note = sample_note(&notes);
        let now = Utc::now();
        let cards = storage
            .generate_for_note(&note, &MockContentGenerator::instant(), now)
            .await
            .unwrap();

        storage.submit_review(cards[0].id, true, now).unwrap();
        storage.submit_review(cards[1].id, false, now).unwrap();

        let stats = storage.stats(now).unwrap();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.due, 3);
        assert_eq!(stats.easy, 1);
        assert_eq!(stats.hard, 1);
        assert_eq!(stats.medium, 3);
        // (1.0 + 0.0 + 0 + 0 + 0) / 5
        assert_eq!(stats.average_accuracy, 20);

        assert_eq!(storage.due_cards(now).unwrap().len(), 3);
        assert_eq!(storage.due_cards(now + Duration::days(4)).unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_delete_card() {
        let (storage, notes) = create_test_storage();
        let note = sample_note(&notes);
        let cards = storage
            .generate_for_note(&note, &MockContentGenerator::instant(), Utc::now())
            .await
            .unwrap();

        storage.delete_card(cards[0].id).unwrap();
        assert_eq!(storage.list_cards().unwrap().len(), 4);
        assert!(storage.delete_card(cards[0].id).is_err());
    }
}
