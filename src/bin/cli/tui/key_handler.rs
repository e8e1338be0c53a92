use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app_state::StudyState;

pub fn handle_key(state: &mut StudyState, key: KeyEvent, now: DateTime<Utc>) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    if state.show_help {
        state.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char('?') => state.show_help = true,
        _ if state.session.is_finished() => {}
        KeyCode::Char(' ') | KeyCode::Enter => state.session.flip(),
        KeyCode::Char('r') => state.session.restart_card(),
        KeyCode::Char('s') | KeyCode::Right => state.session.skip(),
        KeyCode::Char('y') | KeyCode::Char('c') => answer(state, true, now),
        KeyCode::Char('n') | KeyCode::Char('x') => answer(state, false, now),
        _ => {}
    }
}

/// Only answerable once the answer side is showing
fn answer(state: &mut StudyState, is_correct: bool, now: DateTime<Utc>) {
    if !state.session.show_answer() {
        state.flash_message = Some("Flip the card first (space)".to_string());
        return;
    }

    if let Some(card) = state.session.answer(is_correct, now) {
        let verdict = if is_correct { "Correct" } else { "Incorrect" };
        state.flash_message = Some(format!("{}: now {}", verdict, card.difficulty));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studydeck_lib::flashcards::{Difficulty, Flashcard, ReviewSession};
    use uuid::Uuid;

    fn state_with_cards(n: usize) -> StudyState {
        let now = Utc::now();
        let cards = (0..n)
            .map(|i| Flashcard::new(Uuid::new_v4(), format!("Q{}", i), format!("A{}", i), Vec::new(), now))
            .collect();
        StudyState::new(ReviewSession::new(cards, now), &[])
    }

    fn press(state: &mut StudyState, c: char) {
        handle_key(state, KeyEvent::from(KeyCode::Char(c)), Utc::now());
    }

    #[test]
    fn test_answer_requires_flip() {
        let mut state = state_with_cards(1);

        press(&mut state, 'y');
        assert_eq!(state.session.answered(), 0);
        assert!(state.flash_message.is_some());

        press(&mut state, ' ');
        press(&mut state, 'y');
        assert_eq!(state.session.answered(), 1);
        assert!(state.session.is_finished());
    }

    #[test]
    fn test_incorrect_and_skip() {
        let mut state = state_with_cards(3);

        press(&mut state, 's');
        press(&mut state, ' ');
        press(&mut state, 'n');

        assert_eq!(state.session.answered(), 1);
        assert_eq!(state.session.correct(), 0);
        let reviewed = state.session.clone().into_reviewed();
        assert_eq!(reviewed.len(), 1);
        assert_eq!(reviewed[0].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_quit_and_help() {
        let mut state = state_with_cards(1);

        press(&mut state, '?');
        assert!(state.show_help);
        press(&mut state, 'q');
        assert!(!state.quit);
        press(&mut state, 'q');
        assert!(state.quit);
    }
}
