//! Pomodoro session log

use chrono::{DateTime, Utc};

use super::models::*;
use crate::storage::{Result, StorageKey, StudyStore};

#[derive(Clone)]
pub struct PomodoroStorage {
    store: StudyStore,
}

impl PomodoroStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    /// All logged sessions, oldest first
    pub fn list_sessions(&self) -> Result<Vec<PomodoroSession>> {
        self.store.load_collection(StorageKey::Pomodoro)
    }

    /// Append a finished session
    pub fn record_session(&self, session: PomodoroSession) -> Result<PomodoroSession> {
        let mut sessions = self.list_sessions()?;
        sessions.push(session.clone());
        self.store.save_collection(StorageKey::Pomodoro, &sessions)?;

        log::info!(
            "Logged {} pomodoro session of {} min",
            session.session_type,
            session.duration
        );
        Ok(session)
    }

    /// Completed sessions that started on the same UTC day as `now`
    pub fn today_summary(&self, now: DateTime<Utc>) -> Result<PomodoroSummary> {
        let today = now.date_naive();
        let mut summary = PomodoroSummary::default();

        for session in self.list_sessions()? {
            if !session.completed || session.start_time.date_naive() != today {
                continue;
            }
            match session.session_type {
                SessionType::Work => {
                    summary.completed_pomodoros += 1;
                    summary.focus_minutes += session.duration;
                }
                SessionType::ShortBreak | SessionType::LongBreak => {
                    summary.break_minutes += session.duration;
                }
            }
        }

        Ok(summary)
    }
}
