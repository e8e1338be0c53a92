//! Review scheduling
//!
//! A card moves one step along hard → medium → easy per review: towards easy
//! when answered correctly, towards hard otherwise. The next review date is a
//! flat offset from the review time.

use chrono::{DateTime, Duration, Utc};

use super::models::Flashcard;

/// Days until the next review after a correct answer
pub const CORRECT_INTERVAL_DAYS: i64 = 3;

/// Days until the next review after an incorrect answer
pub const INCORRECT_INTERVAL_DAYS: i64 = 1;

/// Next review date for an answer given at `now`
pub fn next_review_at(is_correct: bool, now: DateTime<Utc>) -> DateTime<Utc> {
    let days = if is_correct {
        CORRECT_INTERVAL_DAYS
    } else {
        INCORRECT_INTERVAL_DAYS
    };
    now + Duration::days(days)
}

/// Apply one review to a card.
///
/// Counters always advance, so reviewing the same card twice is not the same
/// as reviewing it once.
pub fn review_card(card: &Flashcard, is_correct: bool, now: DateTime<Utc>) -> Flashcard {
    let mut updated = card.clone();
    updated.difficulty = card.difficulty.after_review(is_correct);
    updated.next_review = next_review_at(is_correct, now);
    updated.review_count += 1;
    if is_correct {
        updated.correct_count += 1;
    }
    updated
}

/// A card is due when it was never reviewed or its review date has passed
pub fn is_due(card: &Flashcard, now: DateTime<Utc>) -> bool {
    card.review_count == 0 || card.next_review <= now
}

/// Due cards, in input order
pub fn due_cards(cards: &[Flashcard], now: DateTime<Utc>) -> Vec<Flashcard> {
    cards.iter().filter(|c| is_due(c, now)).cloned().collect()
}
