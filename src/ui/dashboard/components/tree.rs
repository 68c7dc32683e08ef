//! Channel tree panel

use super::super::state::{DashboardState, Focus};
use crate::guild::TreeRow;
use crate::state::SelectionKind;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Border style shared by the three focusable panes.
pub fn pane_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { Color::LightCyan } else { Color::Cyan };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    if focused {
        block.title_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

/// First row to draw so that `cursor` stays visible in `height` rows.
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor.saturating_sub(height - 1)
    }
}

pub fn render_tree(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let focused = state.focus == Focus::Tree;
    let selected = state.app.selection.as_ref();
    let rows = state.tree_rows();
    let height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = if state.app.snapshot.is_none() {
        vec![Line::from(Span::styled(
            "Guild not loaded. [R] reload, [S] settings",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        rows.iter()
            .enumerate()
            .skip(scroll_offset(state.tree_cursor, height))
            .map(|(index, row)| {
                let (text, style, id, kind) = match row {
                    TreeRow::RootHeader => (
                        "(no category)".to_string(),
                        Style::default().fg(Color::DarkGray),
                        None,
                        None,
                    ),
                    TreeRow::Category {
                        id,
                        name,
                        collapsed,
                    } => (
                        format!("{} {}", if *collapsed { "+" } else { "-" }, name.to_uppercase()),
                        Style::default()
                            .fg(Color::LightBlue)
                            .add_modifier(Modifier::BOLD),
                        Some(id),
                        Some(SelectionKind::Category),
                    ),
                    TreeRow::Channel {
                        id,
                        name,
                        icon,
                        nested,
                    } => (
                        format!("{}{} {}", if *nested { "  " } else { "" }, icon, name),
                        Style::default().fg(Color::White),
                        Some(id),
                        Some(SelectionKind::Channel),
                    ),
                };
                let is_selected = selected
                    .is_some_and(|s| Some(&s.id) == id && Some(s.kind) == kind);
                let mut style = style;
                if is_selected {
                    style = style.fg(Color::LightYellow);
                }
                if focused && index == state.tree_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(Span::styled(text, style))
            })
            .collect()
    };

    let channels = state
        .app
        .snapshot
        .as_ref()
        .map(|s| s.tree().channel_count())
        .unwrap_or_default();
    let block = pane_block(format!("CHANNELS ({})", channels), focused);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(5, 0), 0);
    }
}
