//! Connection settings.
//!
//! The effective configuration is built from three layers, later ones winning:
//! empty defaults, values baked in at compile time, and the settings file in the
//! user's home directory.

use crate::consts::cli_consts::{CONFIG_DIR, CONFIG_FILE};
use crate::error::WarroomError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(rename = "BACKEND_URL", default, skip_serializing_if = "String::is_empty")]
    pub gateway_url: String,
    #[serde(
        rename = "BACKEND_API_KEY",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub gateway_key: String,
    #[serde(rename = "RELAY_URL", default, skip_serializing_if = "String::is_empty")]
    pub relay_url: String,
    #[serde(
        rename = "RELAY_API_KEY",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub relay_key: String,
    #[serde(rename = "GUILD_ID", default, skip_serializing_if = "String::is_empty")]
    pub guild_id: String,
    #[serde(
        rename = "SNAPSHOT_KEY",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub snapshot_key: String,
}

/// One layer of settings. Absent fields leave the lower layer untouched.
#[derive(Deserialize, Debug, Clone, Default)]
struct ConfigLayer {
    #[serde(rename = "BACKEND_URL")]
    gateway_url: Option<String>,
    #[serde(rename = "BACKEND_API_KEY")]
    gateway_key: Option<String>,
    #[serde(rename = "RELAY_URL")]
    relay_url: Option<String>,
    #[serde(rename = "RELAY_API_KEY")]
    relay_key: Option<String>,
    #[serde(rename = "GUILD_ID")]
    guild_id: Option<String>,
    #[serde(rename = "SNAPSHOT_KEY")]
    snapshot_key: Option<String>,
}

impl ConfigLayer {
    /// Values captured from the build environment.
    fn build_time() -> Self {
        Self {
            gateway_url: option_env!("WARROOM_BACKEND_URL").map(str::to_string),
            gateway_key: option_env!("WARROOM_BACKEND_API_KEY").map(str::to_string),
            relay_url: option_env!("WARROOM_RELAY_URL").map(str::to_string),
            relay_key: option_env!("WARROOM_RELAY_API_KEY").map(str::to_string),
            guild_id: option_env!("WARROOM_GUILD_ID").map(str::to_string),
            snapshot_key: option_env!("WARROOM_SNAPSHOT_KEY").map(str::to_string),
        }
    }

    fn apply(self, config: &mut Config) {
        let fields = [
            (self.gateway_url, &mut config.gateway_url),
            (self.gateway_key, &mut config.gateway_key),
            (self.relay_url, &mut config.relay_url),
            (self.relay_key, &mut config.relay_key),
            (self.guild_id, &mut config.guild_id),
            (self.snapshot_key, &mut config.snapshot_key),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Settable fields, by the names used on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigField {
    GatewayUrl,
    GatewayKey,
    RelayUrl,
    RelayKey,
    GuildId,
    SnapshotKey,
}

impl ConfigField {
    pub const ALL: [ConfigField; 6] = [
        ConfigField::GatewayUrl,
        ConfigField::GatewayKey,
        ConfigField::RelayUrl,
        ConfigField::RelayKey,
        ConfigField::GuildId,
        ConfigField::SnapshotKey,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::GatewayUrl => "Gateway URL",
            ConfigField::GatewayKey => "Gateway API key",
            ConfigField::RelayUrl => "Relay URL",
            ConfigField::RelayKey => "Relay API key",
            ConfigField::GuildId => "Guild ID",
            ConfigField::SnapshotKey => "Snapshot key",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            ConfigField::GatewayKey | ConfigField::RelayKey | ConfigField::SnapshotKey
        )
    }
}

/// Returns the path of the settings file, `~/.warroom/config.json`.
pub fn get_config_path() -> Result<PathBuf, WarroomError> {
    let home = home::home_dir()
        .ok_or_else(|| WarroomError::config("Could not determine the home directory"))?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Normalizes a base URL.
///
/// Returns an empty string when the input cannot be made into an absolute
/// http(s) URL, which callers treat as "not configured".
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    match Url::parse(&candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            candidate
        }
        _ => String::new(),
    }
}

impl Config {
    /// Loads the effective configuration, reading the settings file at `path`.
    ///
    /// A missing or malformed file is treated as absent.
    pub fn load(path: &Path) -> Self {
        let stored = match fs::read(path) {
            Ok(buf) => match serde_json::from_slice::<ConfigLayer>(&buf) {
                Ok(layer) => Some(layer),
                Err(e) => {
                    log::debug!("ignoring malformed settings file {}: {}", path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };
        Self::from_layers(ConfigLayer::build_time(), stored)
    }

    fn from_layers(build: ConfigLayer, stored: Option<ConfigLayer>) -> Self {
        let mut config = Config::default();
        build.apply(&mut config);
        if let Some(stored) = stored {
            stored.apply(&mut config);
        }
        config.normalized()
    }

    /// Returns a copy with URLs normalized and every other field trimmed.
    pub fn normalized(&self) -> Self {
        Config {
            gateway_url: normalize_url(&self.gateway_url),
            gateway_key: self.gateway_key.trim().to_string(),
            relay_url: normalize_url(&self.relay_url),
            relay_key: self.relay_key.trim().to_string(),
            guild_id: self.guild_id.trim().to_string(),
            snapshot_key: self.snapshot_key.trim().to_string(),
        }
    }

    /// Saves the configuration to a JSON file at the given path, dropping empty fields.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), WarroomError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.normalized())?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the settings file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), WarroomError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::GatewayUrl => &self.gateway_url,
            ConfigField::GatewayKey => &self.gateway_key,
            ConfigField::RelayUrl => &self.relay_url,
            ConfigField::RelayKey => &self.relay_key,
            ConfigField::GuildId => &self.guild_id,
            ConfigField::SnapshotKey => &self.snapshot_key,
        }
    }

    /// Updates one field. URLs that do not normalize are rejected.
    pub fn set(&mut self, field: ConfigField, value: &str) -> Result<(), WarroomError> {
        let value = match field {
            ConfigField::GatewayUrl | ConfigField::RelayUrl => {
                let url = normalize_url(value);
                if url.is_empty() && !value.trim().is_empty() {
                    return Err(WarroomError::validation(format!(
                        "{} invalid: {}",
                        field.label(),
                        value.trim()
                    )));
                }
                url
            }
            _ => value.trim().to_string(),
        };
        match field {
            ConfigField::GatewayUrl => self.gateway_url = value,
            ConfigField::GatewayKey => self.gateway_key = value,
            ConfigField::RelayUrl => self.relay_url = value,
            ConfigField::RelayKey => self.relay_key = value,
            ConfigField::GuildId => self.guild_id = value,
            ConfigField::SnapshotKey => self.snapshot_key = value,
        }
        Ok(())
    }

    /// The guild id, if one is configured.
    pub fn guild_id(&self) -> Option<&str> {
        Some(self.guild_id.as_str()).filter(|id| !id.is_empty())
    }

    /// A copy safe to print: keys are masked.
    pub fn masked(&self) -> Self {
        Config {
            gateway_key: mask_secret(&self.gateway_key),
            relay_key: mask_secret(&self.relay_key),
            snapshot_key: mask_secret(&self.snapshot_key),
            ..self.clone()
        }
    }
}

fn mask_secret(secret: &str) -> String {
    match secret.chars().count() {
        0 => String::new(),
        n if n <= 4 => "*".repeat(n),
        n => {
            let tail: String = secret.chars().skip(n - 4).collect();
            format!("{}{}", "*".repeat(n - 4), tail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn sample() -> Config {
        Config {
            gateway_url: "https://gateway.example.com".to_string(),
            gateway_key: "gw-secret".to_string(),
            relay_url: "http://relay.local:8080".to_string(),
            relay_key: String::new(),
            guild_id: "1234".to_string(),
            snapshot_key: String::new(),
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://x.com/"), "http://x.com");
        assert_eq!(normalize_url("  HTTPS://X.com//  "), "HTTPS://X.com");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
        assert_eq!(normalize_url("not a url"), "");
        assert_eq!(normalize_url("exa mple.com"), "");
    }

    #[test]
    // Loading a saved configuration should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = sample();
        config.save(&path).unwrap();

        let loaded = Config::from_layers(ConfigLayer::default(), read_layer(&path));
        assert_eq!(config, loaded);

        loaded.save(&path).unwrap();
        let reloaded = Config::from_layers(ConfigLayer::default(), read_layer(&path));
        assert_eq!(loaded, reloaded);
    }

    fn read_layer(path: &Path) -> Option<ConfigLayer> {
        serde_json::from_slice(&fs::read(path).unwrap()).ok()
    }

    #[test]
    fn test_save_drops_empty_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        sample().save(&path).unwrap();

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        let object = raw.as_object().unwrap();
        assert!(object.contains_key("BACKEND_URL"));
        assert!(!object.contains_key("RELAY_API_KEY"));
        assert!(!object.contains_key("SNAPSHOT_KEY"));
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        assert!(sample().save(&path).is_ok());
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    // A malformed file is treated as absent.
    fn test_load_ignores_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let config = Config::load(&path);
        assert_eq!(config, Config::from_layers(ConfigLayer::build_time(), None));
    }

    #[test]
    fn test_stored_layer_wins_and_is_normalized() {
        let build = ConfigLayer {
            gateway_url: Some("gateway.build".to_string()),
            relay_url: Some("relay.build".to_string()),
            ..ConfigLayer::default()
        };
        let stored = ConfigLayer {
            relay_url: Some(" relay.stored/ ".to_string()),
            guild_id: Some("  42 ".to_string()),
            ..ConfigLayer::default()
        };

        let config = Config::from_layers(build, Some(stored));
        assert_eq!(config.gateway_url, "https://gateway.build");
        assert_eq!(config.relay_url, "https://relay.stored");
        assert_eq!(config.guild_id, "42");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        sample().save(&path).unwrap();

        Config::clear(&path).unwrap();
        assert!(!path.exists());
        Config::clear(&path).unwrap();
    }

    #[test]
    fn test_set_rejects_invalid_urls() {
        let mut config = Config::default();
        assert!(config.set(ConfigField::RelayUrl, "not a url").is_err());
        config.set(ConfigField::RelayUrl, "relay.example.com/").unwrap();
        assert_eq!(config.relay_url, "https://relay.example.com");
        config.set(ConfigField::RelayUrl, "").unwrap();
        assert_eq!(config.relay_url, "");
    }

    #[test]
    fn test_masked_hides_keys() {
        let masked = sample().masked();
        assert_eq!(masked.gateway_key, "*****cret");
        assert_eq!(masked.relay_key, "");
        assert_eq!(masked.gateway_url, "https://gateway.example.com");
    }
}
