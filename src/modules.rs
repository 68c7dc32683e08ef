//! Gateway module panel: list, toggle, lock and configure feature modules.

use crate::error::WarroomError;
use crate::gateway::Gateway;
use crate::network::ApiResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub lock_reason: Option<String>,
    #[serde(default)]
    pub config: Value,
}

impl ModuleInfo {
    pub fn state_label(&self) -> &'static str {
        match (self.active, self.locked) {
            (_, true) => "LOCKED",
            (true, false) => "ACTIVE",
            (false, false) => "INACTIVE",
        }
    }
}

/// The Gateway answers either with a bare list or with `{"modules": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModuleList {
    Bare(Vec<ModuleInfo>),
    Wrapped { modules: Vec<ModuleInfo> },
}

/// Reply to a module mutation, with the list as it stands afterwards.
#[derive(Debug, Clone)]
pub struct PanelUpdate {
    pub response: ApiResponse,
    pub modules: Vec<ModuleInfo>,
}

fn module_name(name: &str) -> Result<&str, WarroomError> {
    let name = name.trim();
    if name.is_empty() {
        Err(WarroomError::validation("Missing module name"))
    } else {
        Ok(name)
    }
}

fn ensure_configured(gateway: &dyn Gateway) -> Result<(), WarroomError> {
    if gateway.is_configured() {
        Ok(())
    } else {
        Err(WarroomError::config("Missing Gateway URL. Open Settings."))
    }
}

pub async fn list_modules(gateway: &dyn Gateway) -> Result<Vec<ModuleInfo>, WarroomError> {
    ensure_configured(gateway)?;
    let list: ModuleList = gateway.list_modules().await?.into_success()?.decode()?;
    Ok(match list {
        ModuleList::Bare(modules) | ModuleList::Wrapped { modules } => modules,
    })
}

async fn refreshed(
    gateway: &dyn Gateway,
    response: ApiResponse,
) -> Result<PanelUpdate, WarroomError> {
    let modules = list_modules(gateway).await?;
    Ok(PanelUpdate { response, modules })
}

/// Sets `active` to `next` through the module's config endpoint.
pub async fn toggle_active(
    gateway: &dyn Gateway,
    name: &str,
    next: bool,
) -> Result<PanelUpdate, WarroomError> {
    ensure_configured(gateway)?;
    let name = module_name(name)?;
    let response = gateway
        .put_module_config(name, json!({ "active": next }))
        .await?;
    refreshed(gateway, response).await
}

pub async fn lock(
    gateway: &dyn Gateway,
    name: &str,
    reason: &str,
) -> Result<PanelUpdate, WarroomError> {
    ensure_configured(gateway)?;
    let name = module_name(name)?;
    let response = gateway.lock_module(name, reason.trim()).await?;
    refreshed(gateway, response).await
}

pub async fn unlock(gateway: &dyn Gateway, name: &str) -> Result<PanelUpdate, WarroomError> {
    ensure_configured(gateway)?;
    let name = module_name(name)?;
    let response = gateway.unlock_module(name).await?;
    refreshed(gateway, response).await
}

/// Fetches the module and returns its `config` as pretty JSON for editing.
///
/// A module without a `config` field is returned whole.
pub async fn edit_config(gateway: &dyn Gateway, name: &str) -> Result<String, WarroomError> {
    ensure_configured(gateway)?;
    let name = module_name(name)?;
    let module = gateway.get_module(name).await?.into_success()?;
    if module.is_raw() {
        return Err(WarroomError::MalformedResponse(module.body_text()));
    }
    let config = match module.data {
        Value::Object(mut map) if map.contains_key("config") => map.remove("config"),
        other => Some(other),
    };
    Ok(serde_json::to_string_pretty(&config.unwrap_or_default())?)
}

/// Parses edited config text. The config is opaque; any valid JSON is sent as is.
pub fn parse_config(text: &str) -> Result<Value, WarroomError> {
    serde_json::from_str::<Value>(text)
        .map_err(|e| WarroomError::validation(format!("Invalid JSON: {}", e)))
}

/// Validates `text` locally, then writes it to the module's config endpoint.
pub async fn save_config(
    gateway: &dyn Gateway,
    name: &str,
    text: &str,
) -> Result<ApiResponse, WarroomError> {
    let name = module_name(name)?;
    let config = parse_config(text)?;
    ensure_configured(gateway)?;
    gateway.put_module_config(name, config).await
}
