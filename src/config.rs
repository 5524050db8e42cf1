use std::time::Duration;

use fractic_server_error::ServerError;
use ron::from_str;
use serde_derive::{Deserialize, Serialize};

use crate::{entities::PersistConfig, errors::InvalidConfig};

/// Endpoints of the REST adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Authentication service (`/auth/login`).
    pub auth_base_url: String,
    /// Main service (`/api/...` collections).
    pub main_base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub persist: PersistConfig,
    pub api: ApiConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: "http://localhost:8082".to_string(),
            main_base_url: "http://localhost:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl StoreConfig {
    /// Parses RON text. Omitted fields take their defaults.
    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        from_str(s).map_err(|e| InvalidConfig::with_debug(&e))
    }
}
