use std::sync::Mutex;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::errors::SecureTokenError;

/// Platform secure storage for the session token (keychain, keystore).
#[async_trait]
pub trait SecureTokenStorage: Send + Sync {
    async fn get_token(&self) -> Result<Option<String>, ServerError>;

    async fn save_token(&self, token: &str) -> Result<(), ServerError>;

    async fn remove_token(&self) -> Result<(), ServerError>;
}

#[derive(Default)]
pub struct InMemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl SecureTokenStorage for InMemoryTokenStorage {
    async fn get_token(&self) -> Result<Option<String>, ServerError> {
        let token = self
            .token
            .lock()
            .map_err(|e| SecureTokenError::with_debug(&e))?;
        Ok(token.clone())
    }

    async fn save_token(&self, token: &str) -> Result<(), ServerError> {
        *self
            .token
            .lock()
            .map_err(|e| SecureTokenError::with_debug(&e))? = Some(token.to_string());
        Ok(())
    }

    async fn remove_token(&self) -> Result<(), ServerError> {
        *self
            .token
            .lock()
            .map_err(|e| SecureTokenError::with_debug(&e))? = None;
        Ok(())
    }
}
