//! Dashboard state management
//!
//! Contains the dashboard state struct, the input modes and the messages
//! exchanged with background tasks

use crate::config::{Config, ConfigField};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::dispatcher::{Dispatched, Request};
use crate::error::WarroomError;
use crate::events::Event;
use crate::guild::{GuildSnapshot, Member, TreeRow, filter_members};
use crate::modules::{ModuleInfo, PanelUpdate};
use crate::network::ApiResponse;
use crate::state::AppState;
use crate::status::{Service, ServiceStatus};
use crate::ui::app::UIConfig;

use std::collections::{HashSet, VecDeque};

/// Pane receiving navigation keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Focus {
    Tree,
    Members,
    Modules,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tree => Focus::Members,
            Focus::Members => Focus::Modules,
            Focus::Modules => Focus::Tree,
        }
    }
}

/// What a line of typed input will be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Rename,
    Move,
    CreateChannel { voice: bool },
    CreateCategory,
    CreateRole,
    RemoveRole { user_id: String },
    CommandName,
    CommandOptions { name: String },
    MemberSearch,
    LockReason { module: String },
    ModuleConfig { module: String },
    Setting { field: ConfigField },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub label: String,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            input: String::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Prompt(Prompt),
    /// Waiting for y/n before deleting the selected item.
    ConfirmDelete,
    /// Settings form; the index is the highlighted field.
    Settings(usize),
    Debug,
}

/// Work the UI loop should start in the background.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Quit,
    CheckStatus,
    Reload,
    Dispatch(Request),
    RefreshModules,
    ToggleModule { name: String, next: bool },
    LockModule { name: String, reason: String },
    UnlockModule { name: String },
    EditModuleConfig { name: String },
    SaveModuleConfig { name: String, text: String },
    /// The configuration changed; persist it and rebuild the clients.
    SaveSettings,
    /// Delete the settings file and fall back to the built-in defaults.
    ClearSettings,
}

/// Result of a background task, delivered to the UI loop.
#[derive(Debug)]
pub enum Outcome {
    Status(ServiceStatus),
    Guild(Result<GuildSnapshot, WarroomError>),
    Action(Result<Dispatched, WarroomError>),
    Modules(Result<Vec<ModuleInfo>, WarroomError>),
    ModuleUpdate {
        action: String,
        result: Result<PanelUpdate, WarroomError>,
    },
    ModuleConfig {
        name: String,
        result: Result<String, WarroomError>,
    },
    ModuleSaved {
        name: String,
        result: Result<ApiResponse, WarroomError>,
    },
    SettingsSaved(Result<(), WarroomError>),
    SettingsCleared(Result<(), WarroomError>),
}

#[derive(Debug)]
pub struct DashboardState {
    /// Configuration, guild snapshot and selection.
    pub app: AppState,
    pub gateway_status: ServiceStatus,
    pub relay_status: ServiceStatus,
    /// Last module list received from the Gateway.
    pub modules: Vec<ModuleInfo>,
    pub collapsed: HashSet<String>,
    pub member_query: String,
    pub focus: Focus,
    pub tree_cursor: usize,
    pub member_cursor: usize,
    pub module_cursor: usize,
    pub mode: Mode,
    /// Body of the last action reply, shown under the selection.
    pub last_response: Option<String>,
    /// Requests started and not yet answered.
    pub in_flight: usize,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(config: Config, ui_config: UIConfig) -> Self {
        Self {
            app: AppState::new(config),
            gateway_status: ServiceStatus::unknown(Service::Gateway),
            relay_status: ServiceStatus::unknown(Service::Relay),
            modules: Vec::new(),
            collapsed: HashSet::new(),
            member_query: String::new(),
            focus: Focus::Tree,
            tree_cursor: 0,
            member_cursor: 0,
            module_cursor: 0,
            mode: Mode::Normal,
            last_response: None,
            in_flight: 0,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }

    /// Visible rows of the channel tree.
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        self.app
            .snapshot
            .as_ref()
            .map(|s| s.tree().rows(&self.collapsed))
            .unwrap_or_default()
    }

    /// Members matching the current search.
    pub fn visible_members(&self) -> Vec<&Member> {
        self.app
            .snapshot
            .as_ref()
            .map(|s| filter_members(&s.members, &self.member_query))
            .unwrap_or_default()
    }

    pub fn selected_module(&self) -> Option<&ModuleInfo> {
        self.modules.get(self.module_cursor)
    }

    /// Keeps cursors inside their lists after a reload.
    pub fn clamp_cursors(&mut self) {
        let rows = self.tree_rows().len();
        let members = self.visible_members().len();
        self.tree_cursor = self.tree_cursor.min(rows.saturating_sub(1));
        self.member_cursor = self.member_cursor.min(members.saturating_sub(1));
        self.module_cursor = self.module_cursor.min(self.modules.len().saturating_sub(1));
    }
}
