//! Data returned by content generators

use serde::{Deserialize, Serialize};

/// A question/answer pair proposed for a new flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFlashcard {
    pub question: String,
    pub answer: String,
}

/// A multiple-choice question proposed for a quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    pub explanation: String,
}
