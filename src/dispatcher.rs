//! Action dispatch.
//!
//! An [`Action`] is checked against the current state and turned into a
//! [`Request`] without touching the network. Sending a mutating request is
//! always followed by a full reload of the guild state; nothing is patched
//! locally.

use crate::error::WarroomError;
use crate::guild::GuildSnapshot;
use crate::network::ApiResponse;
use crate::relay::{
    CreateChannel, CreateNamed, DeleteChannel, ExecuteCommand, MoveChannel, NewChannelType, Relay,
    RemoveMemberRole, RenameChannel,
};
use crate::state::{AppState, SelectionKind, load_snapshot};
use serde_json::{Map, Value};

/// Something the operator asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rename the selected channel or category.
    Rename { name: String },
    /// Move the selected channel under `parent_id`, or out of any category.
    Move { parent_id: Option<String> },
    /// Delete the selected channel or category.
    Delete { confirmed: bool },
    CreateChannel {
        name: String,
        parent_id: Option<String>,
        kind: NewChannelType,
    },
    CreateCategory { name: String },
    CreateRole { name: String },
    RemoveMemberRole { user_id: String, role_id: String },
    /// Run a named command; `options` is the raw JSON text typed by the operator.
    ExecuteCommand { name: String, options: String },
    TakeSnapshot,
}

/// A validated request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Rename(RenameChannel),
    Move(MoveChannel),
    Delete(DeleteChannel),
    CreateChannel(CreateChannel),
    CreateCategory(CreateNamed),
    CreateRole(CreateNamed),
    RemoveMemberRole(RemoveMemberRole),
    ExecuteCommand(ExecuteCommand),
    TakeSnapshot {
        key: String,
        guild_id: Option<String>,
    },
}

/// Result of a sent request, plus the reload that followed it.
#[derive(Debug)]
pub struct Dispatched {
    pub description: String,
    pub response: ApiResponse,
    /// Present for mutations.
    pub reload: Option<Result<GuildSnapshot, WarroomError>>,
    pub clears_selection: bool,
}

fn required(value: &str, missing: &str) -> Result<String, WarroomError> {
    let value = value.trim();
    if value.is_empty() {
        Err(WarroomError::validation(missing))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses command options. Only a JSON object is accepted.
pub fn parse_command_options(text: &str) -> Result<Map<String, Value>, WarroomError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(options)) => Ok(options),
        _ => Err(WarroomError::validation("Options must be a JSON object")),
    }
}

impl Action {
    /// Checks preconditions against `state`. No request is made.
    pub fn prepare(self, state: &AppState) -> Result<Request, WarroomError> {
        let selection = state.selection.as_ref();
        let renamable = selection
            .filter(|s| matches!(s.kind, SelectionKind::Channel | SelectionKind::Category));

        match self {
            Action::Rename { name } => {
                let target = renamable.ok_or_else(|| WarroomError::validation("Select an item first"))?;
                Ok(Request::Rename(RenameChannel {
                    channel_id: target.id.clone(),
                    name: required(&name, "Missing name")?,
                }))
            }
            Action::Move { parent_id } => {
                let target = selection
                    .filter(|s| s.kind == SelectionKind::Channel)
                    .ok_or_else(|| WarroomError::validation("Select a channel first"))?;
                Ok(Request::Move(MoveChannel {
                    channel_id: target.id.clone(),
                    parent_id: optional(parent_id),
                }))
            }
            Action::Delete { confirmed } => {
                let target = renamable.ok_or_else(|| WarroomError::validation("Select an item first"))?;
                if !confirmed {
                    return Err(WarroomError::validation("Delete not confirmed"));
                }
                Ok(Request::Delete(DeleteChannel {
                    channel_id: target.id.clone(),
                }))
            }
            Action::CreateChannel {
                name,
                parent_id,
                kind,
            } => Ok(Request::CreateChannel(CreateChannel {
                guild_id: state.guild_id(),
                name: required(&name, "Missing name")?,
                parent_id: optional(parent_id),
                kind,
            })),
            Action::CreateCategory { name } => Ok(Request::CreateCategory(CreateNamed {
                guild_id: state.guild_id(),
                name: required(&name, "Missing name")?,
            })),
            Action::CreateRole { name } => Ok(Request::CreateRole(CreateNamed {
                guild_id: state.guild_id(),
                name: required(&name, "Missing name")?,
            })),
            Action::RemoveMemberRole { user_id, role_id } => {
                let user_id = required(&user_id, "Missing member")?;
                let role_id = required(&role_id, "Missing role id")?;
                let guild_id = state
                    .guild_id()
                    .ok_or_else(|| WarroomError::validation("Missing guild id"))?;
                Ok(Request::RemoveMemberRole(RemoveMemberRole {
                    guild_id,
                    user_id,
                    role_id,
                }))
            }
            Action::ExecuteCommand { name, options } => {
                let name = required(&name, "Missing command")?;
                let options = parse_command_options(&options)?;
                Ok(Request::ExecuteCommand(ExecuteCommand {
                    name,
                    options,
                    guild_id: state.guild_id(),
                }))
            }
            Action::TakeSnapshot => {
                let key = state.config.snapshot_key.trim();
                if key.is_empty() {
                    return Err(WarroomError::config("Missing snapshot key"));
                }
                Ok(Request::TakeSnapshot {
                    key: key.to_string(),
                    guild_id: state.guild_id(),
                })
            }
        }
    }
}

impl Request {
    /// Whether the request changes guild state and must be followed by a reload.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Request::ExecuteCommand(_) | Request::TakeSnapshot { .. }
        )
    }

    pub fn describe(&self) -> String {
        match self {
            Request::Rename(r) => format!("rename {} -> {}", r.channel_id, r.name),
            Request::Move(r) => format!(
                "move {} -> {}",
                r.channel_id,
                r.parent_id.as_deref().unwrap_or("(none)")
            ),
            Request::Delete(r) => format!("delete {}", r.channel_id),
            Request::CreateChannel(r) => format!("create {} channel {}", r.kind, r.name),
            Request::CreateCategory(r) => format!("create category {}", r.name),
            Request::CreateRole(r) => format!("create role {}", r.name),
            Request::RemoveMemberRole(r) => {
                format!("remove role {} from {}", r.role_id, r.user_id)
            }
            Request::ExecuteCommand(r) => format!("execute /{}", r.name),
            Request::TakeSnapshot { .. } => "take snapshot".to_string(),
        }
    }

    pub async fn send(self, relay: &dyn Relay) -> Result<ApiResponse, WarroomError> {
        match self {
            Request::Rename(r) => relay.rename_channel(r).await,
            Request::Move(r) => relay.move_channel(r).await,
            Request::Delete(r) => relay.delete_channel(r).await,
            Request::CreateChannel(r) => relay.create_channel(r).await,
            Request::CreateCategory(r) => relay.create_category(r).await,
            Request::CreateRole(r) => relay.create_role(r).await,
            Request::RemoveMemberRole(r) => relay.remove_member_role(r).await,
            Request::ExecuteCommand(r) => relay.execute_command(r).await,
            Request::TakeSnapshot { key, guild_id } => relay.take_snapshot(key, guild_id).await,
        }
    }
}

/// Sends `request` and, for mutations, reloads the guild state.
///
/// A non-success reply is not an error here: it is returned verbatim and the
/// reload still happens.
pub async fn execute(
    request: Request,
    relay: &dyn Relay,
    guild_id: Option<String>,
) -> Result<Dispatched, WarroomError> {
    let description = request.describe();
    let mutation = request.is_mutation();
    let clears_selection = matches!(request, Request::Delete(_));

    let response = request.send(relay).await?;
    let reload = if mutation {
        Some(load_snapshot(relay, guild_id).await)
    } else {
        None
    };

    Ok(Dispatched {
        description,
        response,
        reload,
        clears_selection,
    })
}

impl AppState {
    /// Applies the outcome of a dispatched request.
    ///
    /// Returns the reload error, if the reload failed.
    pub fn apply(&mut self, dispatched: Dispatched) -> (ApiResponse, Option<WarroomError>) {
        if dispatched.clears_selection {
            self.clear_selection();
        }
        let reload_error = match dispatched.reload {
            Some(Ok(snapshot)) => {
                self.replace_snapshot(snapshot);
                None
            }
            Some(Err(e)) => Some(e),
            None => None,
        };
        (dispatched.response, reload_error)
    }
}

/// Validates, sends and applies one action against `state`.
pub async fn dispatch(
    state: &mut AppState,
    relay: &dyn Relay,
    action: Action,
) -> Result<(ApiResponse, Option<WarroomError>), WarroomError> {
    let request = action.prepare(state)?;
    let dispatched = execute(request, relay, state.config.guild_id().map(str::to_string)).await?;
    Ok(state.apply(dispatched))
}
