use crate::error::WarroomError;
use crate::network::ApiResponse;
use serde_json::Value;

pub(crate) mod client;
pub use client::GatewayClient;

#[cfg(test)]
use mockall::automock;

/// The Gateway's core and module-management API.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    fn is_configured(&self) -> bool;

    /// `GET /api/core/status`
    async fn core_status(&self) -> Result<ApiResponse, WarroomError>;

    /// `GET /api/core/health`
    async fn core_health(&self) -> Result<ApiResponse, WarroomError>;

    /// `GET /api/modules`
    async fn list_modules(&self) -> Result<ApiResponse, WarroomError>;

    /// `GET /api/modules/{name}`
    async fn get_module(&self, name: &str) -> Result<ApiResponse, WarroomError>;

    /// `PUT /api/modules/{name}/config`
    async fn put_module_config(
        &self,
        name: &str,
        config: Value,
    ) -> Result<ApiResponse, WarroomError>;

    /// `POST /api/modules/{name}/lock`
    async fn lock_module(&self, name: &str, reason: &str) -> Result<ApiResponse, WarroomError>;

    /// `POST /api/modules/{name}/unlock`
    async fn unlock_module(&self, name: &str) -> Result<ApiResponse, WarroomError>;
}
