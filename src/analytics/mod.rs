//! Study sessions, streaks and reports
//!
//! This module provides:
//! - `StudySession` records written when a study activity finishes
//! - Day-based streak tracking
//! - Range reports and the dashboard summary built from stored data

pub mod models;
pub mod report;
pub mod storage;
pub mod streak;

pub use models::*;
pub use report::{AnalyticsReport, DailyStudyTime, DashboardSummary, SubjectShare, TimeRange};
pub use storage::AnalyticsStorage;
