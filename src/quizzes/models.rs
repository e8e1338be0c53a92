//! Quiz data models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target level of a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for QuizDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizDifficulty::Beginner => "beginner",
            QuizDifficulty::Intermediate => "intermediate",
            QuizDifficulty::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

impl FromStr for QuizDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(QuizDifficulty::Beginner),
            "intermediate" => Ok(QuizDifficulty::Intermediate),
            "advanced" => Ok(QuizDifficulty::Advanced),
            other => Err(format!("Unknown quiz difficulty: {}", other)),
        }
    }
}

fn default_points() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl QuizQuestion {
    pub fn new(question: String, options: Vec<String>, correct_answer: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            options,
            correct_answer,
            explanation: None,
            points: default_points(),
        }
    }
}

/// One completed run through a quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Percentage of correct answers, rounded
    pub score: u32,
    /// Chosen option per question, `None` when left blank
    pub answers: Vec<Option<usize>>,
    /// Seconds between start and end
    pub time_spent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<QuizQuestion>,
    /// Minutes allowed per attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attempts: Vec<QuizAttempt>,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
    #[serde(default)]
    pub subject: String,
}

impl Quiz {
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn best_score(&self) -> Option<u32> {
        self.attempts.iter().map(|a| a.score).max()
    }

    /// Mean attempt score, rounded
    pub fn average_score(&self) -> Option<u32> {
        if self.attempts.is_empty() {
            return None;
        }
        let sum: u32 = self.attempts.iter().map(|a| a.score).sum();
        Some((sum as f64 / self.attempts.len() as f64).round() as u32)
    }

    pub fn last_attempt(&self) -> Option<&QuizAttempt> {
        self.attempts.last()
    }

    /// Moment an attempt started at `start` runs out of time
    pub fn deadline(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.time_limit
            .map(|minutes| start + Duration::minutes(minutes as i64))
    }

    pub fn is_expired(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.deadline(start).map_or(false, |deadline| now >= deadline)
    }
}

/// Fields supplied when creating a quiz by hand
#[derive(Debug, Clone, Default)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
    pub time_limit: Option<u32>,
    pub difficulty: QuizDifficulty,
    pub subject: String,
}
