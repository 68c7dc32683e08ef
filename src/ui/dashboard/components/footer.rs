//! Dashboard footer component
//!
//! Key hints, or the input line while a prompt is open

use super::super::state::{DashboardState, Focus, Mode, Prompt, PromptKind};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn hints(state: &DashboardState) -> &'static str {
    match (&state.mode, state.focus) {
        (Mode::Settings(_), _) => "[Enter] Edit | [C] Clear saved settings | [Esc] Back",
        (Mode::ConfirmDelete, _) => "[Y] Delete | any other key cancels",
        (Mode::Debug, _) => "Any key closes",
        (_, Focus::Modules) => {
            "[A] Toggle | [L] Lock | [U] Unlock | [Enter] Edit config | [Tab] Pane | [Q] Quit"
        }
        _ => {
            "[R]ename [M]ove [D]elete [N]/[V] Channel [C]ategory R[o]le [X] Role- [E]xec [P] Snapshot [/] Search [S]ettings [G] Debug [Shift+R] Reload [Q]uit"
        }
    }
}

/// Keys are typed blind.
fn shown_input(prompt: &Prompt) -> String {
    match prompt.kind {
        PromptKind::Setting { field } if field.is_secret() => "*".repeat(prompt.input.chars().count()),
        _ => prompt.input.clone(),
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_type(BorderType::Thick);

    let footer = match &state.mode {
        Mode::Prompt(prompt) => Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}: ", prompt.label),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(shown_input(prompt), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::LightYellow)),
        ])),
        _ => Paragraph::new(hints(state))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    };
    f.render_widget(footer.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigField;

    #[test]
    fn secret_settings_are_starred() {
        let key = Prompt::new(PromptKind::Setting { field: ConfigField::RelayKey }, "Relay key")
            .with_input("abc");
        assert_eq!(shown_input(&key), "***");

        let url = Prompt::new(PromptKind::Setting { field: ConfigField::RelayUrl }, "Relay URL")
            .with_input("https://r");
        assert_eq!(shown_input(&url), "https://r");
    }
}
