//! Health indicators for the Gateway and the Relay.

use crate::error::WarroomError;
use crate::gateway::Gateway;
use crate::network::ApiResponse;
use crate::relay::Relay;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Service {
    Gateway,
    Relay,
}

/// Last observed state of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub service: Service,
    pub up: bool,
    /// Status code or error message explaining a DOWN indicator.
    pub hint: Option<String>,
}

impl ServiceStatus {
    pub fn unknown(service: Service) -> Self {
        Self {
            service,
            up: false,
            hint: Some("not checked".to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.up { "UP" } else { "DOWN" }
    }

    fn from_outcome(service: Service, outcome: Result<ApiResponse, WarroomError>) -> Self {
        match outcome {
            Ok(response) if response.ok => Self {
                service,
                up: true,
                hint: None,
            },
            Ok(response) => Self {
                service,
                up: false,
                hint: Some(format!("HTTP {}", response.status)),
            },
            Err(WarroomError::Config(_)) => Self {
                service,
                up: false,
                hint: Some("not configured".to_string()),
            },
            Err(WarroomError::Transport(e)) => Self {
                service,
                up: false,
                hint: Some(format!("network error: {}", e)),
            },
            Err(e) => Self {
                service,
                up: false,
                hint: Some(e.to_string()),
            },
        }
    }
}

impl Display for ServiceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{}: {} ({})", self.service, self.label(), hint),
            None => write!(f, "{}: {}", self.service, self.label()),
        }
    }
}

/// Queries the Gateway's status endpoint. No retry.
pub async fn check_gateway(gateway: &dyn Gateway) -> ServiceStatus {
    if !gateway.is_configured() {
        return ServiceStatus::from_outcome(
            Service::Gateway,
            Err(WarroomError::config("Missing Gateway URL")),
        );
    }
    ServiceStatus::from_outcome(Service::Gateway, gateway.core_status().await)
}

/// Queries the Relay's health endpoint. No retry.
pub async fn check_relay(relay: &dyn Relay) -> ServiceStatus {
    if !relay.is_configured() {
        return ServiceStatus::from_outcome(
            Service::Relay,
            Err(WarroomError::config("Missing Relay URL")),
        );
    }
    ServiceStatus::from_outcome(Service::Relay, relay.health().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::MockGateway;
    use crate::relay::{MockRelay, RelayClient};

    #[tokio::test]
    async fn success_is_up() {
        let mut gateway = MockGateway::new();
        gateway.expect_is_configured().return_const(true);
        gateway
            .expect_core_status()
            .times(1)
            .returning(|| Ok(ApiResponse::from_text(200, r#"{"bot":"online"}"#)));

        let status = check_gateway(&gateway).await;
        assert!(status.up);
        assert_eq!(status.hint, None);
        assert_eq!(status.to_string(), "Gateway: UP");
    }

    #[tokio::test]
    async fn server_error_is_down_with_status() {
        let mut relay = MockRelay::new();
        relay.expect_is_configured().return_const(true);
        relay
            .expect_health()
            .times(1)
            .returning(|| Ok(ApiResponse::from_text(500, "oops")));

        let status = check_relay(&relay).await;
        assert!(!status.up);
        assert_eq!(status.label(), "DOWN");
        assert!(status.hint.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn unconfigured_service_is_down_without_request() {
        let mut relay = MockRelay::new();
        relay.expect_is_configured().return_const(false);
        relay.expect_health().times(0);

        let status = check_relay(&relay).await;
        assert!(!status.up);
        assert_eq!(status.hint.as_deref(), Some("not configured"));
    }

    #[tokio::test]
    async fn network_failure_is_down_with_network_hint() {
        // Nothing listens on port 9 of the loopback interface.
        let config = Config {
            relay_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let status = check_relay(&RelayClient::new(&config)).await;
        assert!(!status.up);
        let hint = status.hint.unwrap();
        assert!(hint.starts_with("network error: "));
        assert!(!hint.contains("Network error"), "doubled prefix: {hint}");
    }
}
