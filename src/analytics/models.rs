//! Analytics data models

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hour reported as most productive when nothing was recorded yet
pub const DEFAULT_PRODUCTIVE_HOUR: u32 = 14;

/// Number of accuracy values kept in the snapshot trend
pub const ACCURACY_TREND_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    #[default]
    Solo,
    Group,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Solo => f.write_str("solo"),
            SessionKind::Group => f.write_str("group"),
        }
    }
}

/// A finished stretch of studying
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: u32,
    #[serde(default)]
    pub notes_reviewed: u32,
    #[serde(default)]
    pub flashcards_studied: u32,
    /// Percentage 0..=100
    #[serde(default)]
    pub accuracy: u32,
    #[serde(default)]
    pub focus_score: u32,
    #[serde(default)]
    pub topics_studied: Vec<String>,
    #[serde(default)]
    pub session_type: SessionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl StudySession {
    pub fn new(date: DateTime<Utc>, duration: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            duration,
            notes_reviewed: 0,
            flashcards_studied: 0,
            accuracy: 0,
            focus_score: 0,
            topics_studied: Vec::new(),
            session_type: SessionKind::Solo,
            group_id: None,
        }
    }

    /// Session for a flashcard review that ran from `started_at` to `ended_at`.
    ///
    /// Duration is rounded up to whole minutes.
    pub fn flashcard_review(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        studied: u32,
        accuracy: u32,
        topics: Vec<String>,
    ) -> Self {
        let seconds = (ended_at - started_at).num_seconds().max(0);
        let minutes = ((seconds + 59) / 60) as u32;
        Self {
            flashcards_studied: studied,
            accuracy: accuracy.min(100),
            focus_score: accuracy.min(100),
            topics_studied: topics,
            ..Self::new(ended_at, minutes)
        }
    }
}

/// Consecutive-day study record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStreak {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: DateTime<Utc>,
    pub total_days: u32,
}

impl Default for StudyStreak {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_study_date: Utc::now(),
            total_days: 0,
        }
    }
}

/// Aggregates kept up to date as sessions are recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyAnalytics {
    /// Minutes over all sessions
    pub total_study_time: u32,
    pub average_session_length: u32,
    pub most_productive_hour: u32,
    /// Sessions per studied topic
    pub subject_distribution: BTreeMap<String, u32>,
    /// Minutes per weekday, Sunday first
    pub weekly_progress: [u32; 7],
    /// Accuracy of the most recent sessions, oldest first
    pub accuracy_trend: Vec<u32>,
}

impl Default for StudyAnalytics {
    fn default() -> Self {
        Self {
            total_study_time: 0,
            average_session_length: 0,
            most_productive_hour: DEFAULT_PRODUCTIVE_HOUR,
            subject_distribution: BTreeMap::new(),
            weekly_progress: [0; 7],
            accuracy_trend: Vec::new(),
        }
    }
}

impl StudyAnalytics {
    /// Recompute the snapshot from the full session history
    pub fn from_sessions(sessions: &[StudySession]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let mut snapshot = Self::default();
        let mut minutes_by_hour = [0u32; 24];

        for session in sessions {
            snapshot.total_study_time += session.duration;
            let weekday = session.date.weekday().num_days_from_sunday() as usize;
            snapshot.weekly_progress[weekday] += session.duration;
            minutes_by_hour[session.date.hour() as usize] += session.duration;
            for topic in &session.topics_studied {
                *snapshot.subject_distribution.entry(topic.clone()).or_insert(0) += 1;
            }
        }

        snapshot.average_session_length =
            (snapshot.total_study_time as f64 / sessions.len() as f64).round() as u32;
        snapshot.most_productive_hour = most_productive_hour(&minutes_by_hour);

        let skip = sessions.len().saturating_sub(ACCURACY_TREND_LEN);
        snapshot.accuracy_trend = sessions.iter().skip(skip).map(|s| s.accuracy).collect();

        snapshot
    }
}

/// Hour with the most minutes; the earliest hour wins a tie
pub(crate) fn most_productive_hour(minutes_by_hour: &[u32; 24]) -> u32 {
    let mut best = DEFAULT_PRODUCTIVE_HOUR;
    let mut best_minutes = 0;
    for (hour, minutes) in minutes_by_hour.iter().enumerate() {
        if *minutes > best_minutes {
            best = hour as u32;
            best_minutes = *minutes;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let snapshot = StudyAnalytics::default();
        assert_eq!(snapshot.most_productive_hour, 14);
        assert_eq!(snapshot.weekly_progress, [0; 7]);
        assert!(snapshot.accuracy_trend.is_empty());

        let streak = StudyStreak::default();
        assert_eq!((streak.current_streak, streak.longest_streak, streak.total_days), (0, 0, 0));
    }

    #[test]
    fn test_flashcard_review_rounds_minutes_up() {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let session = StudySession::flashcard_review(
            start,
            start + chrono::Duration::seconds(61),
            4,
            75,
            vec!["Biology".to_string()],
        );

        assert_eq!(session.duration, 2);
        assert_eq!(session.flashcards_studied, 4);
        assert_eq!(session.accuracy, 75);
        assert_eq!(session.date, start + chrono::Duration::seconds(61));
    }

    #[test]
    fn test_snapshot_from_sessions() {
        // 2024-06-02 is a Sunday
        let sunday = Utc.with_ymd_and_hms(2024, 6, 2, 9, 30, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2024, 6, 3, 20, 0, 0).unwrap();

        let mut first = StudySession::new(sunday, 30);
        first.accuracy = 80;
        first.topics_studied = vec!["Math".to_string()];
        let mut second = StudySession::new(monday, 45);
        second.accuracy = 60;
        second.topics_studied = vec!["Math".to_string(), "Physics".to_string()];

        let snapshot = StudyAnalytics::from_sessions(&[first, second]);

        assert_eq!(snapshot.total_study_time, 75);
        assert_eq!(snapshot.average_session_length, 38);
        assert_eq!(snapshot.weekly_progress[0], 30);
        assert_eq!(snapshot.weekly_progress[1], 45);
        assert_eq!(snapshot.most_productive_hour, 20);
        assert_eq!(snapshot.subject_distribution.get("Math"), Some(&2));
        assert_eq!(snapshot.accuracy_trend, vec![80, 60]);
    }
}
