use crate::error::WarroomError;
use crate::network::ApiResponse;
use serde::Serialize;
use serde_json::{Map, Value};

pub(crate) mod client;
pub use client::RelayClient;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameChannel {
    pub channel_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveChannel {
    pub channel_id: String,
    /// `null` on the wire moves the channel out of any category.
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChannel {
    pub channel_id: String,
}

/// Kind of channel created by `create channel`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, clap::ValueEnum, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NewChannelType {
    Text,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub name: String,
    pub parent_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: NewChannelType,
}

/// Body shared by category and role creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNamed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberRole {
    pub guild_id: String,
    pub user_id: String,
    pub role_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCommand {
    pub name: String,
    pub options: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
}

/// The Relay's dashboard API, one method per endpoint.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    fn is_configured(&self) -> bool;

    /// `GET /health`
    async fn health(&self) -> Result<ApiResponse, WarroomError>;

    /// `GET /api/dashboard/guild/state[?guildId=]`
    async fn guild_state(&self, guild_id: Option<String>) -> Result<ApiResponse, WarroomError>;

    async fn rename_channel(&self, request: RenameChannel) -> Result<ApiResponse, WarroomError>;

    async fn move_channel(&self, request: MoveChannel) -> Result<ApiResponse, WarroomError>;

    async fn delete_channel(&self, request: DeleteChannel) -> Result<ApiResponse, WarroomError>;

    async fn create_channel(&self, request: CreateChannel) -> Result<ApiResponse, WarroomError>;

    async fn create_category(&self, request: CreateNamed) -> Result<ApiResponse, WarroomError>;

    async fn create_role(&self, request: CreateNamed) -> Result<ApiResponse, WarroomError>;

    async fn remove_member_role(
        &self,
        request: RemoveMemberRole,
    ) -> Result<ApiResponse, WarroomError>;

    async fn execute_command(&self, request: ExecuteCommand)
    -> Result<ApiResponse, WarroomError>;

    /// `POST /api/snapshot/take?key=&guildId=`
    async fn take_snapshot(
        &self,
        key: String,
        guild_id: Option<String>,
    ) -> Result<ApiResponse, WarroomError>;
}
