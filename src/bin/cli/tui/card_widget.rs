use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use studydeck_lib::flashcards::Difficulty;

use super::app_state::StudyState;

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

pub fn draw_progress(f: &mut Frame, area: Rect, state: &StudyState) {
    let (position, total) = state.session.progress();
    let done = if state.session.is_finished() { total } else { position.saturating_sub(1) };
    let ratio = if total == 0 { 1.0 } else { done as f64 / total as f64 };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!(
            "{}/{}  correct {}/{}",
            done,
            total,
            state.session.correct(),
            state.session.answered()
        ));
    f.render_widget(gauge, area);
}

pub fn draw(f: &mut Frame, area: Rect, state: &StudyState) {
    let Some(card) = state.current() else {
        draw_finished(f, area, state);
        return;
    };

    let showing_answer = state.session.show_answer();
    let side = if showing_answer { " Answer " } else { " Question " };
    let block = Block::default()
        .title(side)
        .title_bottom(Line::from(format!(" {} ", state.source_title(card))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if showing_answer { Color::Green } else { Color::Cyan }));

    let mut lines = vec![
        Line::from(Span::styled(
            card.difficulty.to_string(),
            Style::default().fg(difficulty_color(card.difficulty)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            card.question.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    if showing_answer {
        lines.push(Line::from(""));
        lines.push(Line::from(card.answer.clone()));
    } else if let Some(hint) = &card.hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Hint: {}", hint),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_finished(f: &mut Frame, area: Rect, state: &StudyState) {
    let block = Block::default()
        .title(" Session complete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let text = vec![
        Line::from(""),
        Line::from(format!(
            "  Answered {} cards, {}% correct.",
            state.session.answered(),
            state.session.accuracy()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press q to save and exit.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(text).block(block), area);
}

pub fn draw_help(f: &mut Frame, area: Rect) {
    let block = Block::default().title(" Keys ").borders(Borders::ALL);
    let rows = [
        ("space / enter", "flip the card"),
        ("y / c", "answered correctly"),
        ("n / x", "answered incorrectly"),
        ("s", "skip this card"),
        ("r", "back to the question"),
        ("q / esc", "save and quit"),
    ];
    let text: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(text).block(block), area);
}
