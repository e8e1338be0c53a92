//! Goal data models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days until a goal is due when no target date is given
pub const DEFAULT_TARGET_DAYS: i64 = 7;

/// Urgency shared by goals and reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("Unknown priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGoal {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_date: DateTime<Utc>,
    /// Percentage 0..=100
    pub progress: u8,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
}

impl StudyGoal {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.target_date < now
    }
}

/// Fields supplied when creating a goal
#[derive(Debug, Clone, Default)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    /// Defaults to a week from creation
    pub target_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub category: String,
}
