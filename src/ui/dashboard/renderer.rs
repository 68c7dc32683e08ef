//! Dashboard main renderer

use super::components::{details, footer, header, logs, modules, overlay, tree};
use super::state::{DashboardState, Mode};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Percentage(28),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(main_chunks[1]);

    tree::render_tree(f, content_chunks[0], state);
    details::render_details(f, content_chunks[1], state);
    modules::render_modules(f, content_chunks[2], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);

    match &state.mode {
        Mode::Settings(index) => overlay::render_settings(f, state, *index),
        Mode::Debug => overlay::render_debug(f, state),
        Mode::ConfirmDelete => overlay::render_confirm_delete(f, state),
        Mode::Prompt(_) | Mode::Normal => {}
    }
}
