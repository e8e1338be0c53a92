//! Scoring of quiz answers

use serde::{Deserialize, Serialize};

use super::models::Quiz;

/// Outcome of grading one set of answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub correct: usize,
    pub total: usize,
    /// Rounded percentage of correct answers
    pub score: u32,
    pub points: u32,
}

/// Grade answers against a quiz.
///
/// Missing trailing answers count as unanswered; extra answers are ignored.
pub fn grade(quiz: &Quiz, answers: &[Option<usize>]) -> Grade {
    let mut correct = 0;
    let mut points = 0;

    for (i, question) in quiz.questions.iter().enumerate() {
        if answers.get(i).copied().flatten() == Some(question.correct_answer) {
            correct += 1;
            points += question.points;
        }
    }

    let total = quiz.questions.len();
    let score = if total == 0 {
        0
    } else {
        (correct as f64 / total as f64 * 100.0).round() as u32
    };

    Grade {
        correct,
        total,
        score,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quizzes::models::{QuizDifficulty, QuizQuestion};
    use chrono::Utc;
    use uuid::Uuid;

    fn quiz(correct: &[usize]) -> Quiz {
        Quiz {
            id: Uuid::new_v4(),
            title: "Q".to_string(),
            description: String::new(),
            questions: correct
                .iter()
                .map(|c| {
                    QuizQuestion::new(
                        "?".to_string(),
                        vec!["a".to_string(), "b".to_string(), "c".to_string()],
                        *c,
                    )
                })
                .collect(),
            time_limit: None,
            created_at: Utc::now(),
            attempts: Vec::new(),
            difficulty: QuizDifficulty::Beginner,
            subject: String::new(),
        }
    }

    #[test]
    fn test_grade_rounds_percentage() {
        let quiz = quiz(&[0, 1, 2]);
        let grade = grade(&quiz, &[Some(0), Some(1), Some(0)]);

        assert_eq!(grade.correct, 2);
        assert_eq!(grade.total, 3);
        assert_eq!(grade.score, 67);
        assert_eq!(grade.points, 2);
    }

    #[test]
    fn test_unanswered_and_short_answer_lists() {
        let quiz = quiz(&[0, 1]);
        assert_eq!(grade(&quiz, &[None, Some(1)]).correct, 1);
        assert_eq!(grade(&quiz, &[Some(0)]).score, 50);
        assert_eq!(grade(&quiz, &[]).score, 0);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        assert_eq!(grade(&quiz(&[]), &[Some(1)]).score, 0);
    }
}
