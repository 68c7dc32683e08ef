//! Application state shared by the command line and the dashboard.
//!
//! The snapshot is only ever replaced wholesale; the selection lives here and
//! nowhere else.

use crate::config::Config;
use crate::error::WarroomError;
use crate::guild::GuildSnapshot;
use crate::relay::Relay;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionKind {
    Channel,
    Category,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub kind: SelectionKind,
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: Config,
    pub snapshot: Option<GuildSnapshot>,
    pub selection: Option<Selection>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            snapshot: None,
            selection: None,
        }
    }

    pub fn select_item(&mut self, kind: SelectionKind, id: impl Into<String>) {
        self.selection = Some(Selection {
            kind,
            id: id.into(),
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Installs a freshly loaded snapshot, dropping a selection whose item is gone.
    pub fn replace_snapshot(&mut self, snapshot: GuildSnapshot) {
        if let Some(selection) = &self.selection {
            let still_there = match selection.kind {
                SelectionKind::Channel => snapshot.find_channel(&selection.id).is_some(),
                SelectionKind::Category => snapshot.find_category(&selection.id).is_some(),
                SelectionKind::Member => snapshot.find_member(&selection.id).is_some(),
            };
            if !still_there {
                self.selection = None;
            }
        }
        self.snapshot = Some(snapshot);
    }

    /// Guild id used for requests: the configured one, else the loaded guild's.
    pub fn guild_id(&self) -> Option<String> {
        self.config.guild_id().map(str::to_string).or_else(|| {
            self.snapshot
                .as_ref()
                .and_then(|s| s.guild.as_ref())
                .map(|g| g.id.clone())
                .filter(|id| !id.is_empty())
        })
    }

    pub fn selected_title(&self) -> String {
        let Some(selection) = &self.selection else {
            return "Select a channel".to_string();
        };
        let snapshot = self.snapshot.as_ref();
        let name = match selection.kind {
            SelectionKind::Channel => snapshot
                .and_then(|s| s.find_channel(&selection.id))
                .map(|c| c.name.clone()),
            SelectionKind::Category => snapshot
                .and_then(|s| s.find_category(&selection.id))
                .map(|c| c.name.clone()),
            SelectionKind::Member => snapshot
                .and_then(|s| s.find_member(&selection.id))
                .map(|m| m.display_name().to_string()),
        };
        name.unwrap_or_else(|| match selection.kind {
            SelectionKind::Channel => "Channel".to_string(),
            SelectionKind::Category => "Category".to_string(),
            SelectionKind::Member => "Member".to_string(),
        })
    }

    /// Debug dump: configuration (keys masked), guild and selection.
    pub fn debug_json(&self) -> Value {
        json!({
            "cfg": self.config.masked(),
            "guild": self.snapshot.as_ref().and_then(|s| s.guild.as_ref()).map(|g| json!({
                "id": g.id,
                "name": g.name,
            })),
            "selected": self.selection,
        })
    }
}

/// Fetches the guild state from the Relay.
///
/// Nothing is stored here; callers install the result with
/// [`AppState::replace_snapshot`].
pub async fn load_snapshot(
    relay: &dyn Relay,
    guild_id: Option<String>,
) -> Result<GuildSnapshot, WarroomError> {
    if !relay.is_configured() {
        return Err(WarroomError::config("Missing Relay URL. Open Settings."));
    }
    let response = relay.guild_state(guild_id).await?.into_success()?;
    response.decode()
}
