//! Study companion core: notes, flashcards with review scheduling, quizzes,
//! pomodoro tracking, goals, reminders and study analytics.

pub mod ai;
pub mod analytics;
pub mod config;
pub mod flashcards;
pub mod goals;
pub mod notes;
pub mod pomodoro;
pub mod quizzes;
pub mod reminders;
pub mod storage;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use analytics::{AnalyticsStorage, StudySession, StudyStreak};
use flashcards::{FlashcardStorage, ReviewSession};
use goals::GoalsStorage;
use notes::NotesStorage;
use pomodoro::PomodoroStorage;
use quizzes::QuizStorage;
use reminders::RemindersStorage;
use storage::{FileStore, StudyStore};

/// Every storage, sharing one backend
#[derive(Clone)]
pub struct StudyDeck {
    pub notes: NotesStorage,
    pub flashcards: FlashcardStorage,
    pub quizzes: QuizStorage,
    pub pomodoro: PomodoroStorage,
    pub goals: GoalsStorage,
    pub reminders: RemindersStorage,
    pub analytics: AnalyticsStorage,
}

/// What a finished flashcard review wrote back
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub cards_updated: usize,
    pub session: StudySession,
    pub streak: StudyStreak,
}

impl StudyDeck {
    pub fn new(store: StudyStore) -> Self {
        Self {
            notes: NotesStorage::new(store.clone()),
            flashcards: FlashcardStorage::new(store.clone()),
            quizzes: QuizStorage::new(store.clone()),
            pomodoro: PomodoroStorage::new(store.clone()),
            goals: GoalsStorage::new(store.clone()),
            reminders: RemindersStorage::new(store.clone()),
            analytics: AnalyticsStorage::new(store),
        }
    }

    /// Deck persisted as JSON files under `data_dir`
    pub fn open(data_dir: std::path::PathBuf) -> storage::Result<Self> {
        let backend = FileStore::new(data_dir)?;
        log::debug!("Opened study data at {}", backend.root().display());
        Ok(Self::new(StudyStore::new(Arc::new(backend))))
    }

    pub fn in_memory() -> Self {
        Self::new(StudyStore::in_memory())
    }

    /// Persist the cards answered in `session` and log it as a study session.
    ///
    /// Returns `None` when no card was answered; nothing is written then.
    pub fn finish_review(
        &self,
        session: ReviewSession,
        now: DateTime<Utc>,
    ) -> storage::Result<Option<ReviewOutcome>> {
        if session.answered() == 0 {
            return Ok(None);
        }

        let started_at = session.started_at();
        let studied = session.answered();
        let accuracy = session.accuracy();
        let reviewed = session.into_reviewed();

        let cards_updated = self.flashcards.apply_session(&reviewed)?;

        let categories: HashMap<Uuid, String> = self
            .notes
            .list_notes()?
            .into_iter()
            .map(|n| (n.id, n.category))
            .collect();
        let mut topics: Vec<String> = Vec::new();
        for card in &reviewed {
            if let Some(category) = categories.get(&card.note_id) {
                if !topics.contains(category) {
                    topics.push(category.clone());
                }
            }
        }

        let study_session = StudySession::flashcard_review(started_at, now, studied, accuracy, topics);
        let streak = self.analytics.record_session(study_session.clone())?;

        Ok(Some(ReviewOutcome {
            cards_updated,
            session: study_session,
            streak,
        }))
    }
}
