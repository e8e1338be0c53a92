//! Analytics storage implementation

use chrono::{DateTime, Utc};

use super::models::*;
use crate::storage::{Result, StorageKey, StudyStore};

/// Storage for study sessions, the streak and the analytics snapshot
#[derive(Clone)]
pub struct AnalyticsStorage {
    store: StudyStore,
}

impl AnalyticsStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    /// All recorded sessions, oldest first
    pub fn list_sessions(&self) -> Result<Vec<StudySession>> {
        self.store.load_collection(StorageKey::Sessions)
    }

    /// Sessions dated on or after `since`
    pub fn sessions_since(&self, since: DateTime<Utc>) -> Result<Vec<StudySession>> {
        Ok(self
            .list_sessions()?
            .into_iter()
            .filter(|s| s.date >= since)
            .collect())
    }

    pub fn streak(&self) -> Result<StudyStreak> {
        self.store.load_record(StorageKey::Streak)
    }

    pub fn snapshot(&self) -> Result<StudyAnalytics> {
        self.store.load_record(StorageKey::Analytics)
    }

    /// Append a session, then bring the streak and the snapshot up to date
    pub fn record_session(&self, session: StudySession) -> Result<StudyStreak> {
        let mut sessions = self.list_sessions()?;
        let date = session.date;
        sessions.push(session);
        self.store.save_collection(StorageKey::Sessions, &sessions)?;

        let mut streak = self.streak()?;
        if streak.record_study_day(date) {
            log::info!(
                "Study streak now {} day(s), longest {}",
                streak.current_streak,
                streak.longest_streak
            );
            self.store.save_record(StorageKey::Streak, &streak)?;
        }

        let snapshot = StudyAnalytics::from_sessions(&sessions);
        self.store.save_record(StorageKey::Analytics, &snapshot)?;

        Ok(streak)
    }
}
