//! A single pass over a stack of cards
//!
//! The session holds its own copies of the cards. Reviewed copies are handed
//! back with [`ReviewSession::into_reviewed`] so the caller can persist them in
//! one write.

use chrono::{DateTime, Utc};

use super::models::Flashcard;
use super::scheduler::review_card;

#[derive(Debug, Clone)]
pub struct ReviewSession {
    cards: Vec<Flashcard>,
    reviewed: Vec<bool>,
    index: usize,
    show_answer: bool,
    correct: u32,
    total: u32,
    started_at: DateTime<Utc>,
}

impl ReviewSession {
    pub fn new(cards: Vec<Flashcard>, started_at: DateTime<Utc>) -> Self {
        let reviewed = vec![false; cards.len()];
        Self {
            cards,
            reviewed,
            index: 0,
            show_answer: false,
            correct: 0,
            total: 0,
            started_at,
        }
    }

    /// Card currently shown, `None` once every card was answered or skipped
    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.cards.len()
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    /// Toggle between question and answer
    pub fn flip(&mut self) {
        if !self.is_finished() {
            self.show_answer = !self.show_answer;
        }
    }

    /// Turn the current card back to its question side
    pub fn restart_card(&mut self) {
        self.show_answer = false;
    }

    /// Record an answer for the current card and move on
    pub fn answer(&mut self, is_correct: bool, now: DateTime<Utc>) -> Option<&Flashcard> {
        if self.is_finished() {
            return None;
        }

        let i = self.index;
        self.cards[i] = review_card(&self.cards[i], is_correct, now);
        self.reviewed[i] = true;
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
        self.advance();
        Some(&self.cards[i])
    }

    /// Move on without reviewing the current card
    pub fn skip(&mut self) {
        if !self.is_finished() {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.index += 1;
        self.show_answer = false;
    }

    /// (position of the current card, starting at 1; stack size)
    pub fn progress(&self) -> (usize, usize) {
        ((self.index + 1).min(self.cards.len()), self.cards.len())
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn answered(&self) -> u32 {
        self.total
    }

    /// Correct answers as a rounded percentage of answered cards
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.correct as f64 / self.total as f64 * 100.0).round() as u32
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Cards that received an answer, in stack order
    pub fn into_reviewed(self) -> Vec<Flashcard> {
        self.cards
            .into_iter()
            .zip(self.reviewed)
            .filter_map(|(card, reviewed)| reviewed.then_some(card))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::Difficulty;
    use uuid::Uuid;

    fn cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| {
                Flashcard::new(
                    Uuid::new_v4(),
                    format!("Q{}", i),
                    format!("A{}", i),
                    Vec::new(),
                    Utc::now(),
                )
            })
            .collect()
    }

    #[test]
    fn test_answer_advances_and_tallies() {
        let mut session = ReviewSession::new(cards(3), Utc::now());
        assert_eq!(session.progress(), (1, 3));

        session.flip();
        assert!(session.show_answer());

        let reviewed = session.answer(true, Utc::now()).unwrap();
        assert_eq!(reviewed.difficulty, Difficulty::Easy);
        assert!(!session.show_answer());
        assert_eq!(session.progress(), (2, 3));

        session.answer(false, Utc::now());
        session.skip();

        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert_eq!(session.answered(), 2);
        assert_eq!(session.correct(), 1);
        assert_eq!(session.accuracy(), 50);
    }

    #[test]
    fn test_into_reviewed_drops_skipped_cards() {
        let stack = cards(3);
        let skipped_id = stack[1].id;
        let mut session = ReviewSession::new(stack, Utc::now());

        session.answer(true, Utc::now());
        session.skip();
        session.answer(true, Utc::now());

        let reviewed = session.into_reviewed();
        assert_eq!(reviewed.len(), 2);
        assert!(reviewed.iter().all(|c| c.id != skipped_id));
        assert!(reviewed.iter().all(|c| c.review_count == 1));
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let mut session = ReviewSession::new(Vec::new(), Utc::now());
        assert!(session.is_finished());
        assert!(session.answer(true, Utc::now()).is_none());
        session.flip();
        assert!(!session.show_answer());
        assert_eq!(session.accuracy(), 0);
        assert_eq!(session.progress(), (0, 0));
    }
}
