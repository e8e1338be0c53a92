use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::goals::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    #[default]
    Study,
    Review,
    Deadline,
    Exam,
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReminderType::Study => "study",
            ReminderType::Review => "review",
            ReminderType::Deadline => "deadline",
            ReminderType::Exam => "exam",
        };
        f.write_str(name)
    }
}

impl FromStr for ReminderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "study" => Ok(ReminderType::Study),
            "review" => Ok(ReminderType::Review),
            "deadline" => Ok(ReminderType::Deadline),
            "exam" => Ok(ReminderType::Exam),
            other => Err(format!("Unknown reminder type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type", default)]
    pub reminder_type: ReminderType,
}

#[derive(Debug, Clone)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub reminder_type: ReminderType,
}
