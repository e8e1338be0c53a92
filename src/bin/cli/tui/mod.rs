mod app_state;
mod card_widget;
mod key_handler;
mod status_bar;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use studydeck_lib::flashcards::{Flashcard, ReviewSession};

use crate::app::App;
use app_state::StudyState;

/// Study due cards (or every card with `all`), optionally only those from one note
pub fn run(app: App, all: bool, note: Option<&str>) -> Result<()> {
    let now = Utc::now();
    let mut cards: Vec<Flashcard> = if all {
        app.deck.flashcards.list_cards()
    } else {
        app.deck.flashcards.due_cards(now)
    }
    .context("Failed to load flashcards")?;

    if let Some(reference) = note {
        let note = app.find_note(reference)?;
        cards.retain(|c| c.note_id == note.id);
    }

    if cards.is_empty() {
        println!("No cards to study. Generate some with `cards generate <note>` or pass --all.");
        return Ok(());
    }

    let notes = app.deck.notes.list_notes().context("Failed to load notes")?;
    let mut state = StudyState::new(ReviewSession::new(cards, now), &notes);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result?;

    let outcome = app
        .deck
        .finish_review(state.session, Utc::now())
        .context("Failed to save review results")?;
    match outcome {
        Some(outcome) => {
            println!(
                "Reviewed {} cards, {}% correct, {} min.",
                outcome.session.flashcards_studied, outcome.session.accuracy, outcome.session.duration
            );
            println!("Study streak: {} days", outcome.streak.current_streak);
        }
        None => println!("No cards answered; nothing saved."),
    }
    Ok(())
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut StudyState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if state.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    key_handler::handle_key(state, key, Utc::now());
                }
            }
        }
    }
}
