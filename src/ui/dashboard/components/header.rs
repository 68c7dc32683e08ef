//! Dashboard header component
//!
//! Renders the title, guild name and the two status indicators

use super::super::state::DashboardState;
use super::super::utils::status_color;
use crate::status::ServiceStatus;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

fn status_pill(status: &ServiceStatus) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", status.service),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("[{}]", status.label()),
            Style::default()
                .fg(status_color(status))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(hint) = &status.hint {
        spans.push(Span::styled(
            format!(" {}", hint),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let guild = state
        .app
        .snapshot
        .as_ref()
        .map(|s| s.guild_name().to_string())
        .unwrap_or_else(|| "no guild loaded".to_string());
    let busy = if state.in_flight > 0 {
        format!(" {}", SPINNER[state.tick % SPINNER.len()])
    } else {
        String::new()
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("WARROOM v{}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", guild), Style::default().fg(Color::White)),
        Span::styled(busy, Style::default().fg(Color::LightYellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, chunks[0]);

    let mut spans = status_pill(&state.gateway_status);
    spans.push(Span::raw("  "));
    spans.extend(status_pill(&state.relay_status));
    let statuses = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(statuses, chunks[1]);
}
