//! Selection details and member list

use super::super::state::{DashboardState, Focus};
use super::tree::{pane_block, scroll_offset};
use crate::state::SelectionKind;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn selection_lines(state: &DashboardState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let (Some(selection), Some(snapshot)) = (&state.app.selection, &state.app.snapshot) else {
        lines.push(Line::from(Span::styled(
            "Enter selects a channel, category or member",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    };

    lines.push(field("Type", selection.kind.to_string()));
    lines.push(field("Id", selection.id.clone()));
    match selection.kind {
        SelectionKind::Channel | SelectionKind::Category => {
            let channel = snapshot
                .find_channel(&selection.id)
                .or_else(|| snapshot.find_category(&selection.id));
            if let Some(channel) = channel {
                lines.push(field("Position", channel.position.to_string()));
                if let Some(parent) = &channel.parent_id {
                    let parent_name = snapshot
                        .find_category(parent)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| parent.clone());
                    lines.push(field("Category", parent_name));
                }
            }
        }
        SelectionKind::Member => {
            if let Some(member) = snapshot.find_member(&selection.id) {
                lines.push(field("Tag", member.tag.clone()));
                let roles: Vec<String> = member
                    .roles
                    .iter()
                    .map(|id| format!("{} ({})", snapshot.role_name(id), id))
                    .collect();
                lines.push(field("Roles", roles.join(", ")));
            }
        }
    }

    if let Some(response) = &state.last_response {
        lines.push(Line::raw(""));
        lines.extend(
            response
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray)))),
        );
    }
    lines
}

pub fn render_details(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let details = Paragraph::new(selection_lines(state))
        .block(
            Block::default()
                .title(state.app.selected_title())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(details, chunks[0]);

    let focused = state.focus == Focus::Members;
    let members = state.visible_members();
    let height = chunks[1].height.saturating_sub(2) as usize;
    let selected_id = state
        .app
        .selection
        .as_ref()
        .filter(|s| s.kind == SelectionKind::Member)
        .map(|s| s.id.as_str());

    let lines: Vec<Line> = members
        .iter()
        .enumerate()
        .skip(scroll_offset(state.member_cursor, height))
        .map(|(index, member)| {
            let mut style = if Some(member.id.as_str()) == selected_id {
                Style::default().fg(Color::LightYellow)
            } else {
                Style::default().fg(Color::White)
            };
            if focused && index == state.member_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(member.display_name().to_string(), style),
                Span::styled(format!("  {}", member.id), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let title = if state.member_query.is_empty() {
        format!("MEMBERS ({})", members.len())
    } else {
        format!("MEMBERS ({}) /{}", members.len(), state.member_query)
    };
    f.render_widget(Paragraph::new(lines).block(pane_block(title, focused)), chunks[1]);
}
