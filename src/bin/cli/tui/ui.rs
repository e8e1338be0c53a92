use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::StudyState;
use super::{card_widget, status_bar};

pub fn draw(f: &mut Frame, state: &StudyState) {
    let size = f.area();

    // Progress gauge, card, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(size);

    card_widget::draw_progress(f, outer[0], state);
    if state.show_help {
        card_widget::draw_help(f, outer[1]);
    } else {
        card_widget::draw(f, outer[1], state);
    }
    status_bar::draw(f, outer[2], state);
}
