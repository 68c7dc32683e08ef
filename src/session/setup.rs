//! Session setup and initialization

use crate::config::Config;
use crate::gateway::{Gateway, GatewayClient};
use crate::relay::{Relay, RelayClient};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration and the two clients built from it, shared by commands and the dashboard
pub struct SessionData {
    pub config: Config,
    /// Where the configuration is saved
    pub config_path: PathBuf,
    pub relay: Arc<dyn Relay>,
    pub gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for SessionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionData")
            .field("config", &self.config.masked())
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}

impl SessionData {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            relay: Arc::new(RelayClient::new(&config)),
            gateway: Arc::new(GatewayClient::new(&config)),
            config,
            config_path,
        }
    }

    /// Replaces the configuration and rebuilds both clients from it.
    pub fn reconnect(&mut self, config: Config) {
        self.relay = Arc::new(RelayClient::new(&config));
        self.gateway = Arc::new(GatewayClient::new(&config));
        self.config = config;
    }

    pub fn guild_id(&self) -> Option<String> {
        self.config.guild_id().map(str::to_string)
    }
}

/// Loads the configuration at `config_path` and connects the clients.
///
/// A missing or unreadable file yields the built-in defaults.
pub fn setup_session(config_path: PathBuf) -> SessionData {
    let config = Config::load(&config_path);
    log::debug!(
        "session: gateway={:?} relay={:?}",
        config.gateway_url,
        config.relay_url
    );
    SessionData::new(config, config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reconnect_follows_new_configuration() {
        let dir = tempdir().unwrap();
        let mut session = setup_session(dir.path().join("config.json"));

        session.reconnect(Config {
            relay_url: "https://relay.example.com".to_string(),
            ..session.config.clone()
        });
        assert!(session.relay.is_configured());
        assert_eq!(session.config.relay_url, "https://relay.example.com");
        assert_eq!(session.gateway.is_configured(), !session.config.gateway_url.is_empty());
    }

    #[test]
    fn debug_output_masks_keys() {
        let session = SessionData::new(
            Config {
                relay_key: "topsecretkey".to_string(),
                ..Config::default()
            },
            PathBuf::from("/tmp/config.json"),
        );
        let text = format!("{:?}", session);
        assert!(!text.contains("topsecretkey"));
    }
}
