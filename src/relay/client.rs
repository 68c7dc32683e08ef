//! Relay client
//!
//! Speaks the Relay's dashboard API: guild state reads and channel, role and
//! command mutations.

use super::{
    CreateChannel, CreateNamed, DeleteChannel, ExecuteCommand, MoveChannel, Relay,
    RemoveMemberRole, RenameChannel,
};
use crate::config::Config;
use crate::consts::cli_consts::relay;
use crate::error::WarroomError;
use crate::network::client::with_query;
use crate::network::{ApiResponse, ServiceClient};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: ServiceClient,
}

impl RelayClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: ServiceClient::new("Relay", &config.relay_url, &config.relay_key),
        }
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        request: &T,
    ) -> Result<ApiResponse, WarroomError> {
        let body = serde_json::to_value(request)?;
        self.http.post(endpoint, &body).await
    }
}

#[async_trait::async_trait]
impl Relay for RelayClient {
    fn is_configured(&self) -> bool {
        self.http.is_configured()
    }

    async fn health(&self) -> Result<ApiResponse, WarroomError> {
        self.http.get(relay::HEALTH).await
    }

    async fn guild_state(&self, guild_id: Option<String>) -> Result<ApiResponse, WarroomError> {
        let endpoint = with_query(relay::GUILD_STATE, &[("guildId", guild_id.as_deref())]);
        self.http.get(&endpoint).await
    }

    async fn rename_channel(&self, request: RenameChannel) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::CHANNEL_RENAME, &request).await
    }

    async fn move_channel(&self, request: MoveChannel) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::CHANNEL_MOVE, &request).await
    }

    async fn delete_channel(&self, request: DeleteChannel) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::CHANNEL_DELETE, &request).await
    }

    async fn create_channel(&self, request: CreateChannel) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::CHANNEL_CREATE, &request).await
    }

    async fn create_category(&self, request: CreateNamed) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::CATEGORY_CREATE, &request).await
    }

    async fn create_role(&self, request: CreateNamed) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::ROLE_CREATE, &request).await
    }

    async fn remove_member_role(
        &self,
        request: RemoveMemberRole,
    ) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::MEMBER_ROLE_REMOVE, &request).await
    }

    async fn execute_command(
        &self,
        request: ExecuteCommand,
    ) -> Result<ApiResponse, WarroomError> {
        self.post_json(relay::COMMAND_EXECUTE, &request).await
    }

    async fn take_snapshot(
        &self,
        key: String,
        guild_id: Option<String>,
    ) -> Result<ApiResponse, WarroomError> {
        let endpoint = with_query(
            relay::SNAPSHOT_TAKE,
            &[("key", Some(key.as_str())), ("guildId", guild_id.as_deref())],
        );
        self.http.post(&endpoint, &json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guild::GuildSnapshot;
    use crate::relay::NewChannelType;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RelayClient {
        let config = Config {
            relay_url: server.uri(),
            relay_key: "relay-key".to_string(),
            ..Config::default()
        };
        RelayClient::new(&config)
    }

    #[tokio::test]
    async fn guild_state_loads_and_builds_tree() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/guild/state"))
            .and(query_param("guildId", "42"))
            .and(header("X-API-Key", "relay-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "guild": { "id": "42", "name": "HQ" },
                "categories": [
                    { "id": "A", "name": "Ops", "type": 4, "position": 0 },
                    { "id": "B", "name": "Archive", "type": 4, "position": 1 }
                ],
                "channels": [
                    { "id": "3", "name": "c", "type": 0, "parentId": "A", "position": 2 },
                    { "id": "1", "name": "a", "type": 0, "parentId": "A", "position": 0 },
                    { "id": "5", "name": "root-b", "type": 0, "parentId": null, "position": 9 },
                    { "id": "2", "name": "b", "type": 0, "parentId": "A", "position": 1 },
                    { "id": "4", "name": "root-a", "type": 2, "parentId": null, "position": 3 }
                ],
                "roles": [],
                "members": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .guild_state(Some("42".to_string()))
            .await
            .unwrap();
        let snapshot: GuildSnapshot = response.into_success().unwrap().decode().unwrap();
        let tree = snapshot.tree();

        let root: Vec<&str> = tree.root.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(root, vec!["4", "5"]);
        assert_eq!(tree.categories.len(), 2);
        let under_a: Vec<&str> = tree.categories[0]
            .channels
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(under_a, vec!["1", "2", "3"]);
        assert!(tree.categories[1].channels.is_empty());
    }

    #[tokio::test]
    async fn move_sends_null_parent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dashboard/channel/move"))
            .and(body_json(json!({ "channelId": "9", "parentId": null })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .move_channel(MoveChannel {
                channel_id: "9".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();
        assert!(response.ok);
    }

    #[tokio::test]
    async fn create_channel_omits_missing_guild() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dashboard/channel/create"))
            .and(body_json(json!({
                "name": "alerts",
                "parentId": "A",
                "type": "voice"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "77" })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .create_channel(CreateChannel {
                guild_id: None,
                name: "alerts".to_string(),
                parent_id: Some("A".to_string()),
                kind: NewChannelType::Voice,
            })
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.data["id"], "77");
    }

    #[tokio::test]
    async fn snapshot_take_passes_key_and_guild_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/snapshot/take"))
            .and(query_param("key", "snap key"))
            .and(query_param("guildId", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .take_snapshot("snap key".to_string(), Some("42".to_string()))
            .await
            .unwrap();
        assert!(response.ok);
        assert_eq!(response.data, json!({ "raw": "stored" }));
    }

    #[tokio::test]
    async fn failures_surface_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dashboard/channel/delete"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "error": "Missing Permissions" })),
            )
            .mount(&server)
            .await;

        let response = client_for(&server)
            .delete_channel(DeleteChannel {
                channel_id: "1".to_string(),
            })
            .await
            .unwrap();
        assert!(!response.ok);
        assert_eq!(response.status, 403);
        assert_eq!(response.data["error"], "Missing Permissions");
    }
}
