//! Thin JSON-over-HTTP client shared by the Gateway and Relay clients.
//!
//! Every request goes to `<base_url><endpoint>`, carries the optional API key
//! header, and yields an [`ApiResponse`] whatever the status code. No retries.

use super::response::ApiResponse;
use crate::consts::cli_consts::network::{API_KEY_HEADER, connect_timeout, request_timeout};
use crate::error::WarroomError;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde_json::Value;

// User-Agent string with the client version
const USER_AGENT: &str = concat!("warroom/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    /// Display name used in configuration errors ("Relay", "Gateway").
    service: &'static str,
    base_url: String,
    api_key: Option<String>,
}

impl ServiceClient {
    pub fn new(service: &'static str, base_url: &str, api_key: &str) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(connect_timeout())
                .timeout(request_timeout())
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: Some(api_key.trim().to_string()).filter(|k| !k.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    fn build_url(&self, endpoint: &str) -> Result<String, WarroomError> {
        if !self.is_configured() {
            return Err(WarroomError::config(format!(
                "Missing {} URL. Open Settings.",
                self.service
            )));
        }
        Ok(format!(
            "{}/{}",
            self.base_url,
            endpoint.trim_start_matches('/')
        ))
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, WarroomError> {
        let url = self.build_url(endpoint)?;
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse, WarroomError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        log::debug!("{} answered {} ({} bytes)", self.service, status, text.len());
        Ok(ApiResponse::from_text(status, &text))
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, WarroomError> {
        log::debug!("GET {}{}", self.base_url, endpoint);
        let builder = self.request(Method::GET, endpoint)?;
        self.send(builder).await
    }

    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse, WarroomError> {
        log::debug!("POST {}{}", self.base_url, endpoint);
        let builder = self.request(Method::POST, endpoint)?.json(body);
        self.send(builder).await
    }

    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<ApiResponse, WarroomError> {
        log::debug!("PUT {}{}", self.base_url, endpoint);
        let builder = self.request(Method::PUT, endpoint)?.json(body);
        self.send(builder).await
    }
}

/// Appends URL-encoded query parameters, skipping absent values.
pub fn with_query(endpoint: &str, params: &[(&str, Option<&str>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value.map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn query_parameters_are_encoded() {
        assert_eq!(with_query("/health", &[]), "/health");
        assert_eq!(
            with_query("/state", &[("guildId", Some("12 34")), ("key", None)]),
            "/state?guildId=12%2034"
        );
    }

    #[tokio::test]
    async fn missing_base_url_is_a_configuration_error() {
        let client = ServiceClient::new("Relay", "", "");
        let err = client.get("/health").await.unwrap_err();
        assert!(matches!(err, WarroomError::Config(msg) if msg.contains("Missing Relay URL")));
    }

    #[tokio::test]
    async fn api_key_header_is_attached_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("X-API-Key", "secret"))
            .and(body_json(json!({ "a": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClient::new("Relay", &format!("{}/", server.uri()), " secret ");
        let response = client.post("/echo", &json!({ "a": 1 })).await.unwrap();
        assert!(response.ok);
        assert_eq!(response.data, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn non_json_bodies_are_returned_as_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ServiceClient::new("Relay", &server.uri(), "");
        let response = client.get("/health").await.unwrap();
        assert!(!response.ok);
        assert_eq!(response.status, 500);
        assert_eq!(response.data, json!({ "raw": "boom" }));
    }
}
