//! Popups drawn over the dashboard: settings, debug view and delete confirmation

use super::super::state::DashboardState;
use super::super::utils::centered_rect;
use crate::config::ConfigField;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

fn popup(title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightCyan))
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black))
}

pub fn render_settings(f: &mut Frame, state: &DashboardState, index: usize) {
    let area = centered_rect(60, 50, f.area());
    let masked = state.app.config.masked();

    let lines: Vec<Line> = ConfigField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = masked.get(*field);
            let value = if value.is_empty() { "(not set)" } else { value };
            let mut label_style = Style::default().fg(Color::Gray);
            if i == index {
                label_style = label_style
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(format!("{:<16}", field.label()), label_style),
                Span::styled(format!(" {}", value), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(popup("SETTINGS")), area);
}

pub fn render_debug(f: &mut Frame, state: &DashboardState) {
    let area = centered_rect(70, 70, f.area());
    let text = serde_json::to_string_pretty(&state.app.debug_json()).unwrap_or_default();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .block(popup("DEBUG"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_confirm_delete(f: &mut Frame, state: &DashboardState) {
    let area = centered_rect(40, 20, f.area());
    let text = format!("Delete {}? [y/N]", state.app.selected_title());

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ))
        .block(popup("CONFIRM")),
        area,
    );
}
