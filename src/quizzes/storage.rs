//! Quiz storage implementation

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::grading::grade;
use super::models::*;
use crate::ai::ContentGenerator;
use crate::notes::Note;
use crate::storage::{Result, StorageError, StorageKey, StudyStore};

/// Storage for quizzes and their attempts
#[derive(Clone)]
pub struct QuizStorage {
    store: StudyStore,
}

impl QuizStorage {
    pub fn new(store: StudyStore) -> Self {
        Self { store }
    }

    /// List all quizzes
    pub fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        self.store.load_collection(StorageKey::Quizzes)
    }

    /// Get a quiz by ID
    pub fn get_quiz(&self, id: Uuid) -> Result<Quiz> {
        self.list_quizzes()?
            .into_iter()
            .find(|q| q.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Quiz {} not found", id)))
    }

    /// Create a quiz from hand-written questions
    pub fn create_quiz(&self, draft: QuizDraft, now: DateTime<Utc>) -> Result<Quiz> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StorageError::Validation("Please enter a quiz title".to_string()));
        }
        if draft.questions.is_empty() {
            return Err(StorageError::Validation(
                "Please add at least one question".to_string(),
            ));
        }
        for (i, question) in draft.questions.iter().enumerate() {
            validate_question(i, question)?;
        }

        let quiz = Quiz {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            questions: draft.questions,
            time_limit: draft.time_limit.filter(|m| *m > 0),
            created_at: now,
            attempts: Vec::new(),
            difficulty: draft.difficulty,
            subject: draft.subject.trim().to_string(),
        };

        let mut quizzes = self.list_quizzes()?;
        quizzes.insert(0, quiz.clone());
        self.save_quizzes(&quizzes)?;

        log::info!("Created quiz {} with {} questions", quiz.id, quiz.questions.len());
        Ok(quiz)
    }

    /// Build a quiz from generated questions about a note
    pub async fn generate_from_note(
        &self,
        note: &Note,
        title: Option<&str>,
        generator: &dyn ContentGenerator,
        now: DateTime<Utc>,
    ) -> Result<Quiz> {
        let generated = generator.generate_quiz_questions(&note.content).await?;

        let questions = generated
            .into_iter()
            .map(|g| QuizQuestion {
                explanation: Some(g.explanation),
                ..QuizQuestion::new(g.question, g.options, g.correct_answer)
            })
            .collect();

        let draft = QuizDraft {
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} Quiz", note.title)),
            description: format!("Generated from \"{}\"", note.title),
            questions,
            time_limit: None,
            difficulty: QuizDifficulty::Beginner,
            subject: note.category.clone(),
        };

        self.create_quiz(draft, now)
    }

    /// Delete a quiz and its attempts
    pub fn delete_quiz(&self, id: Uuid) -> Result<()> {
        let mut quizzes = self.list_quizzes()?;
        let len_before = quizzes.len();
        quizzes.retain(|q| q.id != id);

        if quizzes.len() == len_before {
            return Err(StorageError::NotFound(format!("Quiz {} not found", id)));
        }

        self.save_quizzes(&quizzes)
    }

    /// Grade a finished attempt and append it to the quiz
    pub fn record_attempt(
        &self,
        quiz_id: Uuid,
        answers: Vec<Option<usize>>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<QuizAttempt> {
        let mut quizzes = self.list_quizzes()?;
        let quiz = quizzes
            .iter_mut()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| StorageError::NotFound(format!("Quiz {} not found", quiz_id)))?;

        if answers.len() > quiz.questions.len() {
            return Err(StorageError::Validation(format!(
                "Got {} answers for {} questions",
                answers.len(),
                quiz.questions.len()
            )));
        }

        let mut answers = answers;
        answers.resize(quiz.questions.len(), None);

        let attempt = QuizAttempt {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            score: grade(quiz, &answers).score,
            answers,
            time_spent: (end_time - start_time).num_seconds().max(0),
        };
        quiz.attempts.push(attempt.clone());
        self.save_quizzes(&quizzes)?;

        Ok(attempt)
    }

    fn save_quizzes(&self, quizzes: &[Quiz]) -> Result<()> {
        self.store.save_collection(StorageKey::Quizzes, quizzes)
    }
}

fn validate_question(index: usize, question: &QuizQuestion) -> Result<()> {
    if question.question.trim().is_empty() {
        return Err(StorageError::Validation(format!(
            "Question {} has no text",
            index + 1
        )));
    }
    if question.options.len() < 2 {
        return Err(StorageError::Validation(format!(
            "Question {} needs at least two options",
            index + 1
        )));
    }
    if question.correct_answer >= question.options.len() {
        return Err(StorageError::Validation(format!(
            "Question {} marks option {} as correct but has {} options",
            index + 1,
            question.correct_answer + 1,
            question.options.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockContentGenerator;
    use crate::notes::{NoteDraft, NotesStorage};
    use chrono::Duration;

    fn create_test_storage() -> (QuizStorage, NotesStorage) {
        let store = StudyStore::in_memory();
        (QuizStorage::new(store.clone()), NotesStorage::new(store))
    }

    fn two_option_question(correct: usize) -> QuizQuestion {
        QuizQuestion::new(
            "Capital of France?".to_string(),
            vec!["Paris".to_string(), "Lyon".to_string()],
            correct,
        )
    }

    #[test]
    fn test_create_quiz_validation() {
        let (storage, _) = create_test_storage();
        let now = Utc::now();

        let untitled = storage.create_quiz(
            QuizDraft {
                questions: vec![two_option_question(0)],
                ..Default::default()
            },
            now,
        );
        assert!(matches!(untitled, Err(StorageError::Validation(_))));

        let empty = storage.create_quiz(
            QuizDraft {
                title: "Geo".to_string(),
                ..Default::default()
            },
            now,
        );
        assert!(matches!(empty, Err(StorageError::Validation(_))));

        let out_of_range = storage.create_quiz(
            QuizDraft {
                title: "Geo".to_string(),
                questions: vec![two_option_question(2)],
                ..Default::default()
            },
            now,
        );
        assert!(matches!(out_of_range, Err(StorageError::Validation(_))));

        assert!(storage.list_quizzes().unwrap().is_empty());
    }

    #[test]
    fn test_record_attempt_scores_and_times() {
        let (storage, _) = create_test_storage();
        let quiz = storage
            .create_quiz(
                QuizDraft {
                    title: "Geo".to_string(),
                    questions: vec![two_option_question(0), two_option_question(1)],
                    time_limit: Some(10),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        let start = Utc::now();
        let end = start + Duration::seconds(95);
        let attempt = storage
            .record_attempt(quiz.id, vec![Some(0)], start, end)
            .unwrap();

        assert_eq!(attempt.score, 50);
        assert_eq!(attempt.answers, vec![Some(0), None]);
        assert_eq!(attempt.time_spent, 95);

        storage.record_attempt(quiz.id, vec![Some(0), Some(1)], start, end).unwrap();
        let stored = storage.get_quiz(quiz.id).unwrap();
        assert_eq!(stored.attempts.len(), 2);
        assert_eq!(stored.best_score(), Some(100));
        assert_eq!(stored.average_score(), Some(75));
        assert!(stored.is_expired(start, start + Duration::minutes(10)));
        assert!(!stored.is_expired(start, start + Duration::minutes(9)));
    }

    #[test]
    fn test_record_attempt_rejects_extra_answers() {
        let (storage, _) = create_test_storage();
        let quiz = storage
            .create_quiz(
                QuizDraft {
                    title: "Geo".to_string(),
                    questions: vec![two_option_question(0)],
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        let now = Utc::now();
        let result = storage.record_attempt(quiz.id, vec![Some(0), Some(1)], now, now);
        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_generate_from_note() {
        let (storage, notes) = create_test_storage();
        let note = notes
            .create_note(
                NoteDraft {
                    title: "Optics".to_string(),
                    content: "Light bends when it changes medium.".to_string(),
                    category: "Physics".to_string(),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        let quiz = storage
            .generate_from_note(&note, None, &MockContentGenerator::instant(), Utc::now())
            .await
            .unwrap();

        assert_eq!(quiz.title, "Optics Quiz");
        assert_eq!(quiz.subject, "Physics");
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.total_points(), 3);
        assert!(quiz.questions.iter().all(|q| q.explanation.is_some()));
    }

    #[test]
    fn test_delete_quiz() {
        let (storage, _) = create_test_storage();
        let quiz = storage
            .create_quiz(
                QuizDraft {
                    title: "Geo".to_string(),
                    questions: vec![two_option_question(0)],
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        storage.delete_quiz(quiz.id).unwrap();
        assert!(storage.get_quiz(quiz.id).is_err());
    }
}
