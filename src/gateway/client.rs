//! Gateway client

use super::Gateway;
use crate::config::Config;
use crate::consts::cli_consts::gateway;
use crate::error::WarroomError;
use crate::network::{ApiResponse, ServiceClient};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: ServiceClient,
}

impl GatewayClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: ServiceClient::new("Gateway", &config.gateway_url, &config.gateway_key),
        }
    }

    fn module_path(name: &str, action: Option<&str>) -> String {
        let name = urlencoding::encode(name);
        match action {
            Some(action) => format!("{}/{}/{}", gateway::MODULES, name, action),
            None => format!("{}/{}", gateway::MODULES, name),
        }
    }
}

#[async_trait::async_trait]
impl Gateway for GatewayClient {
    fn is_configured(&self) -> bool {
        self.http.is_configured()
    }

    async fn core_status(&self) -> Result<ApiResponse, WarroomError> {
        self.http.get(gateway::CORE_STATUS).await
    }

    async fn core_health(&self) -> Result<ApiResponse, WarroomError> {
        self.http.get(gateway::CORE_HEALTH).await
    }

    async fn list_modules(&self) -> Result<ApiResponse, WarroomError> {
        self.http.get(gateway::MODULES).await
    }

    async fn get_module(&self, name: &str) -> Result<ApiResponse, WarroomError> {
        self.http.get(&Self::module_path(name, None)).await
    }

    async fn put_module_config(
        &self,
        name: &str,
        config: Value,
    ) -> Result<ApiResponse, WarroomError> {
        self.http
            .put(&Self::module_path(name, Some("config")), &config)
            .await
    }

    async fn lock_module(&self, name: &str, reason: &str) -> Result<ApiResponse, WarroomError> {
        self.http
            .post(
                &Self::module_path(name, Some("lock")),
                &json!({ "reason": reason }),
            )
            .await
    }

    async fn unlock_module(&self, name: &str) -> Result<ApiResponse, WarroomError> {
        self.http
            .post(&Self::module_path(name, Some("unlock")), &json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GatewayClient {
        let config = Config {
            gateway_url: server.uri(),
            gateway_key: "gw-key".to_string(),
            ..Config::default()
        };
        GatewayClient::new(&config)
    }

    #[test]
    fn module_names_are_encoded_into_paths() {
        assert_eq!(
            GatewayClient::module_path("mirror", Some("config")),
            "/api/modules/mirror/config"
        );
        assert_eq!(
            GatewayClient::module_path("auto mod", None),
            "/api/modules/auto%20mod"
        );
    }

    #[tokio::test]
    async fn mirror_config_is_put_to_its_own_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/modules/mirror/config"))
            .and(header("X-API-Key", "gw-key"))
            .and(body_json(json!({ "targets": ["a", "b"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "saved": true })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .put_module_config("mirror", json!({ "targets": ["a", "b"] }))
            .await
            .unwrap();
        assert!(response.ok);
    }

    #[tokio::test]
    async fn lock_sends_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/modules/tickets/lock"))
            .and(body_json(json!({ "reason": "incident 12" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .lock_module("tickets", "incident 12")
            .await
            .unwrap();
        assert!(response.ok);
        assert_eq!(response.status, 204);
    }
}
