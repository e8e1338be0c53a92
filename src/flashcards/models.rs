//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty bucket of a card, ordered hard → medium → easy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    /// One step towards easy; saturates at `Easy`
    pub fn easier(self) -> Self {
        match self {
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Easy => Difficulty::Easy,
        }
    }

    /// One step towards hard; saturates at `Hard`
    pub fn harder(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    /// Bucket after a review with the given outcome
    pub fn after_review(self, is_correct: bool) -> Self {
        if is_correct {
            self.easier()
        } else {
            self.harder()
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// A flashcard with its review state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    /// Note the card was generated from
    pub note_id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Earliest time the card should be shown again
    pub next_review: DateTime<Utc>,
    /// Total number of reviews
    #[serde(default)]
    pub review_count: u32,
    /// Number of correct reviews, never above `review_count`
    #[serde(default)]
    pub correct_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Flashcard {
    /// A never-reviewed card at medium difficulty, due immediately
    pub fn new(
        note_id: Uuid,
        question: String,
        answer: String,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            note_id,
            question,
            answer,
            difficulty: Difficulty::Medium,
            next_review: now,
            review_count: 0,
            correct_count: 0,
            created_at: now,
            tags,
            hint: None,
        }
    }

    /// Share of correct reviews in 0.0..=1.0, 0.0 for an unreviewed card
    pub fn accuracy(&self) -> f64 {
        if self.review_count == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.review_count as f64
        }
    }
}

/// Filter over the card list
#[derive(Debug, Clone, Default)]
pub struct FlashcardFilter {
    /// Case-insensitive match against question or answer
    pub search: Option<String>,
    pub note_id: Option<Uuid>,
    pub difficulty: Option<Difficulty>,
}

impl FlashcardFilter {
    pub fn matches(&self, card: &Flashcard) -> bool {
        let matches_search = match &self.search {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                card.question.to_lowercase().contains(&term)
                    || card.answer.to_lowercase().contains(&term)
            }
            _ => true,
        };
        let matches_note = self.note_id.map_or(true, |id| card.note_id == id);
        let matches_difficulty = self.difficulty.map_or(true, |d| card.difficulty == d);

        matches_search && matches_note && matches_difficulty
    }
}

/// Statistics over all flashcards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardStats {
    pub total: usize,
    pub due: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    /// Mean per-card accuracy as a rounded percentage
    pub average_accuracy: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");

        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("trivial".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_filter_matches_search_case_insensitively() {
        let card = Flashcard::new(
            Uuid::new_v4(),
            "What is ATP?".to_string(),
            "Energy currency".to_string(),
            Vec::new(),
            Utc::now(),
        );

        let by_question = FlashcardFilter {
            search: Some("atp".to_string()),
            ..Default::default()
        };
        let by_answer = FlashcardFilter {
            search: Some("CURRENCY".to_string()),
            ..Default::default()
        };
        let by_difficulty = FlashcardFilter {
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };

        assert!(by_question.matches(&card));
        assert!(by_answer.matches(&card));
        assert!(!by_difficulty.matches(&card));
        assert!(FlashcardFilter::default().matches(&card));
    }
}
