//! Keyboard handling
//!
//! Keys only change local state and return [`Intent`]s; nothing here touches
//! the network.

use super::state::{DashboardState, Focus, Intent, Mode, Prompt, PromptKind};
use crate::config::ConfigField;
use crate::dispatcher::Action;
use crate::error::WarroomError;
use crate::events::{Event, Source};
use crate::guild::TreeRow;
use crate::relay::NewChannelType;
use crate::state::SelectionKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Intent> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Intent::Quit];
        }
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Prompt(prompt) => self.handle_prompt_key(prompt, key),
            Mode::ConfirmDelete => self.handle_confirm_key(key),
            Mode::Settings(index) => self.handle_settings_key(index, key),
            // Any key closes the debug view.
            Mode::Debug => Vec::new(),
        }
    }

    fn reject(&mut self, error: WarroomError) {
        self.add_event(Event::error(Source::Dashboard, "Rejected", &error));
    }

    /// Validates `action` against the current state and queues it.
    fn submit(&mut self, action: Action) -> Vec<Intent> {
        match action.prepare(&self.app) {
            Ok(request) => {
                self.add_event(Event::info(Source::Relay, request.describe()));
                vec![Intent::Dispatch(request)]
            }
            Err(e) => {
                self.reject(e);
                Vec::new()
            }
        }
    }

    fn open_prompt(&mut self, kind: PromptKind, label: &str) {
        self.mode = Mode::Prompt(Prompt::new(kind, label));
    }

    fn has_selection(&mut self, kinds: &[SelectionKind], missing: &str) -> bool {
        let ok = self
            .app
            .selection
            .as_ref()
            .is_some_and(|s| kinds.contains(&s.kind));
        if !ok {
            self.reject(WarroomError::validation(missing));
        }
        ok
    }

    fn move_cursor(&mut self, down: bool) {
        let cursor = match self.focus {
            Focus::Tree => &mut self.tree_cursor,
            Focus::Members => &mut self.member_cursor,
            Focus::Modules => &mut self.module_cursor,
        };
        if down {
            *cursor += 1;
        } else {
            *cursor = cursor.saturating_sub(1);
        }
        self.clamp_cursors();
    }

    /// Parent for a new channel: the selected category, or the selected channel's parent.
    fn creation_parent(&self) -> Option<String> {
        let selection = self.app.selection.as_ref()?;
        match selection.kind {
            SelectionKind::Category => Some(selection.id.clone()),
            SelectionKind::Channel => self
                .app
                .snapshot
                .as_ref()?
                .find_channel(&selection.id)?
                .parent_id
                .clone(),
            SelectionKind::Member => None,
        }
    }

    fn activate(&mut self) -> Vec<Intent> {
        match self.focus {
            Focus::Tree => {
                match self.tree_rows().get(self.tree_cursor) {
                    Some(TreeRow::Category { id, .. }) => {
                        self.app.select_item(SelectionKind::Category, id.clone())
                    }
                    Some(TreeRow::Channel { id, .. }) => {
                        self.app.select_item(SelectionKind::Channel, id.clone())
                    }
                    _ => {}
                }
                self.last_response = None;
                Vec::new()
            }
            Focus::Members => {
                let id = self
                    .visible_members()
                    .get(self.member_cursor)
                    .map(|m| m.id.clone());
                if let Some(id) = id {
                    self.app.select_item(SelectionKind::Member, id);
                    self.last_response = None;
                }
                Vec::new()
            }
            Focus::Modules => match self.selected_module() {
                Some(module) => vec![Intent::EditModuleConfig {
                    name: module.name.clone(),
                }],
                None => Vec::new(),
            },
        }
    }

    fn toggle_collapse(&mut self) {
        if let Some(TreeRow::Category { id, .. }) = self.tree_rows().get(self.tree_cursor) {
            if !self.collapsed.remove(id) {
                self.collapsed.insert(id.clone());
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Intent> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => vec![Intent::Quit],
            KeyCode::Tab => {
                self.focus = self.focus.next();
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                Vec::new()
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char(' ') if self.focus == Focus::Tree => {
                self.toggle_collapse();
                Vec::new()
            }
            KeyCode::Char('R') | KeyCode::F(5) => {
                vec![Intent::CheckStatus, Intent::Reload, Intent::RefreshModules]
            }
            KeyCode::Char('s') => {
                self.mode = Mode::Settings(0);
                Vec::new()
            }
            KeyCode::Char('g') => {
                self.mode = Mode::Debug;
                Vec::new()
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Prompt(
                    Prompt::new(PromptKind::MemberSearch, "Search members")
                        .with_input(self.member_query.clone()),
                );
                Vec::new()
            }
            KeyCode::Char('e') => {
                self.open_prompt(PromptKind::CommandName, "Command name");
                Vec::new()
            }
            KeyCode::Char('p') => self.submit(Action::TakeSnapshot),
            KeyCode::Char('n') | KeyCode::Char('v') => {
                let voice = key.code == KeyCode::Char('v');
                let label = if voice { "New voice channel name" } else { "New text channel name" };
                self.open_prompt(PromptKind::CreateChannel { voice }, label);
                Vec::new()
            }
            KeyCode::Char('c') => {
                self.open_prompt(PromptKind::CreateCategory, "New category name");
                Vec::new()
            }
            KeyCode::Char('o') => {
                self.open_prompt(PromptKind::CreateRole, "New role name");
                Vec::new()
            }
            KeyCode::Char('a') | KeyCode::Char('l') | KeyCode::Char('u')
                if self.focus == Focus::Modules =>
            {
                self.handle_module_key(key.code)
            }
            KeyCode::Char('r') => {
                let renamable = [SelectionKind::Channel, SelectionKind::Category];
                if self.has_selection(&renamable, "Select an item first") {
                    let current = self.app.selected_title();
                    self.mode = Mode::Prompt(
                        Prompt::new(PromptKind::Rename, "Rename to").with_input(current),
                    );
                }
                Vec::new()
            }
            KeyCode::Char('m') => {
                if self.has_selection(&[SelectionKind::Channel], "Select a channel first") {
                    self.open_prompt(PromptKind::Move, "Parent category id (empty for none)");
                }
                Vec::new()
            }
            KeyCode::Char('d') => {
                let deletable = [SelectionKind::Channel, SelectionKind::Category];
                if self.has_selection(&deletable, "Select an item first") {
                    self.mode = Mode::ConfirmDelete;
                }
                Vec::new()
            }
            KeyCode::Char('x') => {
                if self.has_selection(&[SelectionKind::Member], "Select a member first") {
                    let user_id = self
                        .app
                        .selection
                        .as_ref()
                        .map(|s| s.id.clone())
                        .unwrap_or_default();
                    self.open_prompt(PromptKind::RemoveRole { user_id }, "Role id to remove");
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_module_key(&mut self, code: KeyCode) -> Vec<Intent> {
        let Some(module) = self.selected_module().cloned() else {
            return Vec::new();
        };
        match code {
            KeyCode::Char('a') => vec![Intent::ToggleModule {
                name: module.name,
                next: !module.active,
            }],
            KeyCode::Char('l') => {
                self.open_prompt(
                    PromptKind::LockReason {
                        module: module.name,
                    },
                    "Lock reason",
                );
                Vec::new()
            }
            KeyCode::Char('u') => vec![Intent::UnlockModule { name: module.name }],
            _ => Vec::new(),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Vec<Intent> {
        let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
        if !confirmed {
            self.add_event(Event::info(Source::Dashboard, "Delete cancelled"));
            return Vec::new();
        }
        self.submit(Action::Delete { confirmed })
    }

    fn handle_settings_key(&mut self, index: usize, key: KeyEvent) -> Vec<Intent> {
        let last = ConfigField::ALL.len() - 1;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {}
            KeyCode::Up | KeyCode::Char('k') => self.mode = Mode::Settings(index.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => self.mode = Mode::Settings((index + 1).min(last)),
            KeyCode::Char('c') => {
                self.mode = Mode::Settings(index);
                return vec![Intent::ClearSettings];
            }
            KeyCode::Enter => {
                let field = ConfigField::ALL[index.min(last)];
                let current = self.app.config.get(field).to_string();
                self.mode = Mode::Prompt(
                    Prompt::new(PromptKind::Setting { field }, field.label()).with_input(current),
                );
            }
            _ => self.mode = Mode::Settings(index),
        }
        Vec::new()
    }

    fn handle_prompt_key(&mut self, mut prompt: Prompt, key: KeyEvent) -> Vec<Intent> {
        match key.code {
            KeyCode::Esc => {
                if let PromptKind::Setting { field } = prompt.kind {
                    self.mode = Mode::Settings(settings_index(field));
                }
                Vec::new()
            }
            KeyCode::Enter => self.submit_prompt(prompt),
            KeyCode::Backspace => {
                prompt.input.pop();
                self.mode = Mode::Prompt(prompt);
                Vec::new()
            }
            KeyCode::Char(c) => {
                prompt.input.push(c);
                self.mode = Mode::Prompt(prompt);
                Vec::new()
            }
            _ => {
                self.mode = Mode::Prompt(prompt);
                Vec::new()
            }
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) -> Vec<Intent> {
        let input = prompt.input;
        match prompt.kind {
            PromptKind::Rename => self.submit(Action::Rename { name: input }),
            PromptKind::Move => self.submit(Action::Move {
                parent_id: Some(input),
            }),
            PromptKind::CreateChannel { voice } => {
                let kind = if voice {
                    NewChannelType::Voice
                } else {
                    NewChannelType::Text
                };
                let parent_id = self.creation_parent();
                self.submit(Action::CreateChannel {
                    name: input,
                    parent_id,
                    kind,
                })
            }
            PromptKind::CreateCategory => self.submit(Action::CreateCategory { name: input }),
            PromptKind::CreateRole => self.submit(Action::CreateRole { name: input }),
            PromptKind::RemoveRole { user_id } => self.submit(Action::RemoveMemberRole {
                user_id,
                role_id: input,
            }),
            PromptKind::CommandName => {
                let name = input.trim().to_string();
                if name.is_empty() {
                    self.reject(WarroomError::validation("Missing command"));
                } else {
                    self.mode = Mode::Prompt(
                        Prompt::new(PromptKind::CommandOptions { name }, "Options (JSON object)")
                            .with_input("{}"),
                    );
                }
                Vec::new()
            }
            PromptKind::CommandOptions { name } => self.submit(Action::ExecuteCommand {
                name,
                options: input,
            }),
            PromptKind::MemberSearch => {
                self.member_query = input;
                self.member_cursor = 0;
                self.focus = Focus::Members;
                Vec::new()
            }
            PromptKind::LockReason { module } => vec![Intent::LockModule {
                name: module,
                reason: input,
            }],
            PromptKind::ModuleConfig { module } => match crate::modules::parse_config(&input) {
                Ok(_) => vec![Intent::SaveModuleConfig {
                    name: module,
                    text: input,
                }],
                Err(e) => {
                    self.reject(e);
                    Vec::new()
                }
            },
            PromptKind::Setting { field } => {
                self.mode = Mode::Settings(settings_index(field));
                match self.app.config.set(field, &input) {
                    // The edit stays in the form until a Relay URL makes it savable.
                    Ok(()) if self.app.config.relay_url.is_empty() => {
                        self.reject(WarroomError::validation("Relay URL invalid"));
                        Vec::new()
                    }
                    Ok(()) => vec![Intent::SaveSettings],
                    Err(e) => {
                        self.reject(e);
                        Vec::new()
                    }
                }
            }
        }
    }
}

pub(super) fn settings_index(field: ConfigField) -> usize {
    ConfigField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}
