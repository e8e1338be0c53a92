//! Reports derived from stored sessions and notes

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;

use super::models::{most_productive_hour, StudySession};
use crate::goals::StudyGoal;
use crate::notes::Note;

/// Number of recent notes listed on the dashboard
const RECENT_NOTES: usize = 5;

/// Window covered by a report, counted back from now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Year => 365,
        }
    }

    pub fn contains(self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        date >= now - Duration::days(self.days()) && date <= now
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(format!("Unknown time range: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStudyTime {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub day: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectShare {
    pub subject: String,
    pub notes: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub session_count: usize,
    /// Minutes studied in range
    pub total_study_time: u32,
    pub average_accuracy: u32,
    pub average_session_length: u32,
    pub most_productive_hour: u32,
    /// The last seven days, oldest first
    pub daily: Vec<DailyStudyTime>,
    /// Notes per category, largest first
    pub subjects: Vec<SubjectShare>,
}

impl AnalyticsReport {
    pub fn build(
        range: TimeRange,
        now: DateTime<Utc>,
        sessions: &[StudySession],
        notes: &[Note],
    ) -> Self {
        let in_range: Vec<&StudySession> = sessions
            .iter()
            .filter(|s| range.contains(s.date, now))
            .collect();

        let total_study_time: u32 = in_range.iter().map(|s| s.duration).sum();
        let (average_accuracy, average_session_length) = if in_range.is_empty() {
            (0, 0)
        } else {
            let count = in_range.len() as f64;
            let accuracy: u32 = in_range.iter().map(|s| s.accuracy).sum();
            (
                (accuracy as f64 / count).round() as u32,
                (total_study_time as f64 / count).round() as u32,
            )
        };

        let mut minutes_by_hour = [0u32; 24];
        for session in &in_range {
            minutes_by_hour[session.date.hour() as usize] += session.duration;
        }

        Self {
            range,
            session_count: in_range.len(),
            total_study_time,
            average_accuracy,
            average_session_length,
            most_productive_hour: most_productive_hour(&minutes_by_hour),
            daily: last_seven_days(now, sessions),
            subjects: subject_distribution(notes),
        }
    }

    /// Day with the most study time in the last week; the earliest wins a tie
    pub fn most_productive_day(&self) -> Option<&DailyStudyTime> {
        // max_by_key keeps the last maximum, so walk backwards
        self.daily.iter().rev().max_by_key(|d| d.minutes)
    }
}

fn last_seven_days(now: DateTime<Utc>, sessions: &[StudySession]) -> Vec<DailyStudyTime> {
    let today = now.date_naive();
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let minutes = sessions
                .iter()
                .filter(|s| s.date.date_naive() == date)
                .map(|s| s.duration)
                .sum();
            DailyStudyTime {
                date,
                day: date.format("%a").to_string(),
                minutes,
            }
        })
        .collect()
}

fn subject_distribution(notes: &[Note]) -> Vec<SubjectShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for note in notes {
        *counts.entry(note.category.as_str()).or_insert(0) += 1;
    }

    let mut subjects: Vec<SubjectShare> = counts
        .into_iter()
        .map(|(subject, count)| SubjectShare {
            subject: subject.to_string(),
            notes: count,
            percentage: (count as f64 / notes.len() as f64 * 100.0).round() as u32,
        })
        .collect();
    subjects.sort_by(|a, b| b.notes.cmp(&a.notes).then_with(|| a.subject.cmp(&b.subject)));
    subjects
}

/// Headline numbers for the start screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub notes_created: usize,
    pub study_minutes_today: u32,
    pub active_goals: usize,
    /// Mean session accuracy this week (weeks start on Sunday)
    pub weekly_accuracy: u32,
    pub current_streak: u32,
    pub recent_notes: Vec<Note>,
}

impl DashboardSummary {
    pub fn build(
        now: DateTime<Utc>,
        notes: &[Note],
        sessions: &[StudySession],
        goals: &[StudyGoal],
        current_streak: u32,
    ) -> Self {
        let today = now.date_naive();
        let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);

        let study_minutes_today = sessions
            .iter()
            .filter(|s| s.date.date_naive() == today)
            .map(|s| s.duration)
            .sum();

        let this_week: Vec<u32> = sessions
            .iter()
            .filter(|s| {
                let date = s.date.date_naive();
                date >= week_start && date < week_start + Duration::days(7)
            })
            .map(|s| s.accuracy)
            .collect();
        let weekly_accuracy = if this_week.is_empty() {
            0
        } else {
            (this_week.iter().sum::<u32>() as f64 / this_week.len() as f64).round() as u32
        };

        Self {
            notes_created: notes.len(),
            study_minutes_today,
            active_goals: goals.iter().filter(|g| !g.is_completed).count(),
            weekly_accuracy,
            current_streak,
            recent_notes: notes.iter().take(RECENT_NOTES).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{NoteDraft, NotesStorage};
    use crate::storage::StudyStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        // Wednesday
        Utc.with_ymd_and_hms(2024, 6, 12, 16, 0, 0).unwrap()
    }

    fn session(days_ago: i64, hour: u32, minutes: u32, accuracy: u32) -> StudySession {
        let naive = (now() - Duration::days(days_ago))
            .date_naive()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        let date = Utc.from_utc_datetime(&naive);
        let mut session = StudySession::new(date, minutes);
        session.accuracy = accuracy;
        session
    }

    fn notes(categories: &[&str]) -> Vec<Note> {
        let storage = NotesStorage::new(StudyStore::in_memory());
        for (i, category) in categories.iter().enumerate() {
            storage
                .create_note(
                    NoteDraft {
                        title: format!("Note {}", i),
                        category: category.to_string(),
                        ..Default::default()
                    },
                    now(),
                )
                .unwrap();
        }
        storage.list_notes().unwrap()
    }

    #[test]
    fn test_time_range_parsing_and_bounds() {
        assert_eq!("Month".parse::<TimeRange>().unwrap(), TimeRange::Month);
        assert!("decade".parse::<TimeRange>().is_err());

        let now = now();
        assert!(TimeRange::Week.contains(now - Duration::days(7), now));
        assert!(!TimeRange::Week.contains(now - Duration::days(8), now));
        assert!(!TimeRange::Week.contains(now + Duration::hours(1), now));
    }

    #[test]
    fn test_report_filters_by_range() {
        let sessions = vec![
            session(0, 9, 30, 90),
            session(2, 20, 50, 70),
            session(20, 9, 100, 10),
        ];

        let week = AnalyticsReport::build(TimeRange::Week, now(), &sessions, &[]);
        assert_eq!(week.session_count, 2);
        assert_eq!(week.total_study_time, 80);
        assert_eq!(week.average_accuracy, 80);
        assert_eq!(week.average_session_length, 40);
        assert_eq!(week.most_productive_hour, 20);

        let month = AnalyticsReport::build(TimeRange::Month, now(), &sessions, &[]);
        assert_eq!(month.session_count, 3);
        assert_eq!(month.total_study_time, 180);
        assert_eq!(month.most_productive_hour, 9);
    }

    #[test]
    fn test_empty_report() {
        let report = AnalyticsReport::build(TimeRange::Year, now(), &[], &[]);
        assert_eq!(report.total_study_time, 0);
        assert_eq!(report.average_accuracy, 0);
        assert_eq!(report.most_productive_hour, 14);
        assert_eq!(report.daily.len(), 7);
        assert!(report.subjects.is_empty());
    }

    #[test]
    fn test_daily_series_ends_today() {
        let sessions = vec![session(0, 9, 30, 0), session(0, 11, 15, 0), session(3, 9, 20, 0)];
        let report = AnalyticsReport::build(TimeRange::Week, now(), &sessions, &[]);

        assert_eq!(report.daily[6].date, now().date_naive());
        assert_eq!(report.daily[6].day, "Wed");
        assert_eq!(report.daily[6].minutes, 45);
        assert_eq!(report.daily[3].minutes, 20);
        assert_eq!(report.most_productive_day().map(|d| d.minutes), Some(45));
    }

    #[test]
    fn test_subject_distribution() {
        let notes = notes(&["Math", "Physics", "Math"]);
        let report = AnalyticsReport::build(TimeRange::Week, now(), &[], &notes);

        assert_eq!(report.subjects[0].subject, "Math");
        assert_eq!(report.subjects[0].notes, 2);
        assert_eq!(report.subjects[0].percentage, 67);
        assert_eq!(report.subjects[1].percentage, 33);
    }

    #[test]
    fn test_dashboard_summary() {
        let notes = notes(&["A", "B", "C", "D", "E", "F"]);
        // Sunday of this week and last Saturday
        let sessions = vec![
            session(0, 9, 25, 90),
            session(3, 9, 10, 70),
            session(4, 9, 60, 10),
        ];

        let summary = DashboardSummary::build(now(), &notes, &sessions, &[], 3);
        assert_eq!(summary.notes_created, 6);
        assert_eq!(summary.study_minutes_today, 25);
        assert_eq!(summary.weekly_accuracy, 80);
        assert_eq!(summary.active_goals, 0);
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.recent_notes.len(), 5);
    }
}
