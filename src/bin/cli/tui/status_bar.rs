use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::StudyState;

pub fn draw(f: &mut Frame, area: Rect, state: &StudyState) {
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = if state.show_help {
        " Any key: close help "
    } else if state.session.is_finished() {
        " q: save and quit "
    } else if state.session.show_answer() {
        " y: correct  n: incorrect  r: question  s: skip  ?: help  q: quit "
    } else {
        " space: show answer  s: skip  ?: help  q: quit "
    };

    let status = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
