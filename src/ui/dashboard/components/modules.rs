//! Module panel

use super::super::state::{DashboardState, Focus};
use super::tree::{pane_block, scroll_offset};
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render_modules(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let focused = state.focus == Focus::Modules;
    // Two lines per module.
    let height = (area.height.saturating_sub(2) / 2) as usize;

    let lines: Vec<Line> = state
        .modules
        .iter()
        .enumerate()
        .skip(scroll_offset(state.module_cursor, height))
        .flat_map(|(index, module)| {
            let state_color = match module.state_label() {
                "ACTIVE" => Color::LightGreen,
                "LOCKED" => Color::LightRed,
                _ => Color::DarkGray,
            };
            let mut name_style = Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);
            if focused && index == state.module_cursor {
                name_style = name_style.add_modifier(Modifier::REVERSED);
            }
            let mut detail = module.description.clone();
            if let Some(reason) = module.lock_reason.as_deref().filter(|_| module.locked) {
                detail = format!("locked: {}", reason);
            }
            [
                Line::from(vec![
                    Span::styled(module.name.clone(), name_style),
                    Span::styled(
                        format!(" [{}]", module.state_label()),
                        Style::default().fg(state_color),
                    ),
                    Span::styled(
                        if module.owner.is_empty() {
                            String::new()
                        } else {
                            format!(" @{}", module.owner)
                        },
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", detail),
                    Style::default().fg(Color::Gray),
                )),
            ]
        })
        .collect();

    let title = format!("MODULES ({})", state.modules.len());
    f.render_widget(Paragraph::new(lines).block(pane_block(title, focused)), area);
}
