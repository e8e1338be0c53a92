//! Content generation for study material
//!
//! This module provides:
//! - The `ContentGenerator` port used by notes, flashcards and quizzes
//! - A deterministic mock generator that stands in for a model backend

mod mock;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;

use crate::analytics::StudySession;
use crate::notes::Note;

pub use mock::{MockContentGenerator, MockLatency};
pub use models::{GeneratedFlashcard, GeneratedQuestion};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, AiError>;

/// Capability to turn raw study material into derived content.
///
/// Callers only depend on this trait, so a model-backed implementation can
/// replace [`MockContentGenerator`] without touching them.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Convert recorded audio into text
    async fn transcribe_audio(&self, audio: &[u8]) -> Result<String>;

    /// Condense a block of text into key points
    async fn summarize_text(&self, text: &str) -> Result<String>;

    /// Derive question/answer pairs from note content
    async fn generate_flashcards(&self, text: &str) -> Result<Vec<GeneratedFlashcard>>;

    /// Derive multiple-choice questions from note content
    async fn generate_quiz_questions(&self, text: &str) -> Result<Vec<GeneratedQuestion>>;

    /// Suggest what to study next
    async fn study_recommendations(
        &self,
        notes: &[Note],
        sessions: &[StudySession],
    ) -> Result<Vec<String>>;
}
