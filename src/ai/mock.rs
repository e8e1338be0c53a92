//! Fixed-output content generator
//!
//! Outputs are deterministic and do not depend on the meaning of the input.
//! Each call sleeps for a fixed latency to mimic a remote model.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use super::models::{GeneratedFlashcard, GeneratedQuestion};
use super::{ContentGenerator, Result};
use crate::analytics::StudySession;
use crate::notes::Note;

const TRANSCRIPTION: &str = "This is a mock transcription of your audio note. In a real implementation, this would be processed by a speech-to-text model to convert your speech to text accurately.";

const MAX_SUMMARY_SENTENCES: usize = 3;
const MAX_GENERATED_CARDS: usize = 5;
/// Words need more than this many characters to become a flashcard
const MIN_KEYWORD_CHARS: usize = 4;
const QUIZ_TOPICS: [&str; 5] = ["concept", "definition", "application", "example", "principle"];
const QUIZ_QUESTION_COUNT: usize = 3;

const RECOMMENDATIONS: [&str; 6] = [
    "Review notes from 3 days ago for better retention",
    "Focus on topics with lower accuracy scores",
    "Take a 10-minute break between study sessions",
    "Create more flashcards for complex topics",
    "Try the Pomodoro technique for better focus",
    "Review your weakest subject areas more frequently",
];

/// Simulated latency per operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub transcribe: Duration,
    pub summarize: Duration,
    pub flashcards: Duration,
    pub quiz: Duration,
    pub recommendations: Duration,
}

impl MockLatency {
    pub fn none() -> Self {
        Self {
            transcribe: Duration::ZERO,
            summarize: Duration::ZERO,
            flashcards: Duration::ZERO,
            quiz: Duration::ZERO,
            recommendations: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            transcribe: Duration::from_millis(2000),
            summarize: Duration::from_millis(1500),
            flashcards: Duration::from_millis(2000),
            quiz: Duration::from_millis(2500),
            recommendations: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockContentGenerator {
    latency: MockLatency,
}

impl MockContentGenerator {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }

    /// Generator that answers immediately
    pub fn instant() -> Self {
        Self::new(MockLatency::none())
    }

    async fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// First sentences of `text`, prefixed with "Key points:"
fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SUMMARY_SENTENCES)
        .collect();

    format!("Key points: {}.", sentences.join(". "))
}

/// Distinct long words in order of first appearance
fn keywords(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS)
        .filter(|w| seen.insert(*w))
        .take(MAX_GENERATED_CARDS)
        .collect()
}

fn quiz_questions() -> Vec<GeneratedQuestion> {
    QUIZ_TOPICS
        .iter()
        .take(QUIZ_QUESTION_COUNT)
        .enumerate()
        .map(|(index, topic)| GeneratedQuestion {
            question: format!(
                "Which of the following best describes the {} mentioned in the content?",
                topic
            ),
            options: ["A", "B", "C", "D"]
                .iter()
                .zip(["First", "Second", "Third", "Fourth"])
                .map(|(letter, ordinal)| {
                    format!("Option {}: {} possible answer about {}", letter, ordinal, topic)
                })
                .collect(),
            correct_answer: index % 4,
            explanation: format!(
                "This is the correct answer because it accurately represents the {} as discussed in the source material.",
                topic
            ),
        })
        .collect()
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn transcribe_audio(&self, audio: &[u8]) -> Result<String> {
        self.simulate(self.latency.transcribe).await;
        log::debug!("Mock transcription of {} bytes", audio.len());
        Ok(TRANSCRIPTION.to_string())
    }

    async fn summarize_text(&self, text: &str) -> Result<String> {
        self.simulate(self.latency.summarize).await;
        Ok(summarize(text))
    }

    async fn generate_flashcards(&self, text: &str) -> Result<Vec<GeneratedFlashcard>> {
        self.simulate(self.latency.flashcards).await;
        Ok(keywords(text)
            .into_iter()
            .map(|word| GeneratedFlashcard {
                question: format!("What is the significance of \"{}\" in this context?", word),
                answer: format!("{} is a key concept discussed in the note content.", word),
            })
            .collect())
    }

    async fn generate_quiz_questions(&self, _text: &str) -> Result<Vec<GeneratedQuestion>> {
        self.simulate(self.latency.quiz).await;
        Ok(quiz_questions())
    }

    async fn study_recommendations(
        &self,
        notes: &[Note],
        sessions: &[StudySession],
    ) -> Result<Vec<String>> {
        self.simulate(self.latency.recommendations).await;
        log::debug!(
            "Mock recommendations for {} notes and {} sessions",
            notes.len(),
            sessions.len()
        );
        Ok(RECOMMENDATIONS.iter().map(|r| r.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_takes_first_three_sentences() {
        let text = "Cells divide. DNA replicates first. Mitosis has phases. Cytokinesis ends it.";
        assert_eq!(
            summarize(text),
            "Key points: Cells divide. DNA replicates first. Mitosis has phases."
        );
    }

    #[test]
    fn test_summary_of_short_text() {
        assert_eq!(summarize("Only one sentence"), "Key points: Only one sentence.");
        assert_eq!(summarize(""), "Key points: .");
    }

    #[test]
    fn test_keywords_are_long_distinct_and_capped() {
        let text = "photosynthesis uses light light energy chlorophyll photosynthesis \
                    glucose oxygen carbon dioxide stomata";
        assert_eq!(
            keywords(text),
            vec!["photosynthesis", "light", "energy", "chlorophyll", "glucose"]
        );
    }

    #[test]
    fn test_keywords_skip_short_words() {
        assert!(keywords("a bb ccc dddd").is_empty());
    }

    #[tokio::test]
    async fn test_generate_flashcards_templates() {
        let generator = MockContentGenerator::instant();
        let cards = generator.generate_flashcards("Newton described gravity").await.unwrap();

        assert_eq!(cards.len(), 3);
        assert_eq!(
            cards[0].question,
            "What is the significance of \"Newton\" in this context?"
        );
        assert_eq!(
            cards[2].answer,
            "gravity is a key concept discussed in the note content."
        );
    }

    #[tokio::test]
    async fn test_generate_quiz_questions_shape() {
        let generator = MockContentGenerator::instant();
        let questions = generator.generate_quiz_questions("anything").await.unwrap();

        assert_eq!(questions.len(), 3);
        for (index, question) in questions.iter().enumerate() {
            assert_eq!(question.options.len(), 4);
            assert_eq!(question.correct_answer, index % 4);
        }
        assert_eq!(
            questions[1].options[2],
            "Option C: Third possible answer about definition"
        );
    }

    #[tokio::test]
    async fn test_transcription_and_recommendations_are_fixed() {
        let generator = MockContentGenerator::instant();
        let first = generator.transcribe_audio(&[1, 2, 3]).await.unwrap();
        let second = generator.transcribe_audio(&[]).await.unwrap();
        assert_eq!(first, second);

        let tips = generator.study_recommendations(&[], &[]).await.unwrap();
        assert_eq!(tips.len(), 6);
    }
}
