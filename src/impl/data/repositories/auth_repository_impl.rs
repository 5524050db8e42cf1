use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    data::{
        datasources::{
            rest_api_datasource::{RestApiDatasource, Service},
            secure_token_datasource::SecureTokenStorage,
        },
        models::login_response_model::LoginResponseModel,
    },
    domain::repositories::auth_repository::AuthRepository,
    entities::{Credentials, LoginOutcome, Registration, RequestFailure},
};

pub(crate) struct AuthRepositoryImpl {
    api: Arc<RestApiDatasource>,
}

impl AuthRepositoryImpl {
    pub(crate) fn new(api: Arc<RestApiDatasource>) -> Self {
        Self { api }
    }

    fn tokens(&self) -> &Arc<dyn SecureTokenStorage> {
        self.api.tokens()
    }

    async fn store_session<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<LoginOutcome, RequestFailure> {
        let response: LoginResponseModel = self.api.post(Service::Auth, path, body).await?;
        let outcome = LoginOutcome::try_from(response)?;
        self.tokens().save_token(&outcome.token).await?;
        debug!(path, "Session token stored.");
        Ok(outcome)
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, RequestFailure> {
        self.store_session("/auth/login", credentials).await
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<LoginOutcome, RequestFailure> {
        self.store_session("/auth/register", registration).await
    }

    async fn logout(&self) -> Result<(), ServerError> {
        self.tokens().remove_token().await
    }

    async fn stored_token(&self) -> Result<Option<String>, ServerError> {
        self.tokens().get_token().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ApiConfig, data::datasources::secure_token_datasource::InMemoryTokenStorage,
    };

    #[tokio::test]
    async fn logout_forgets_token() {
        let api = RestApiDatasource::new(
            ApiConfig::default(),
            Arc::new(InMemoryTokenStorage::with_token("jwt")),
        )
        .unwrap();
        let repository = AuthRepositoryImpl::new(Arc::new(api));

        assert_eq!(repository.stored_token().await.unwrap().as_deref(), Some("jwt"));
        repository.logout().await.unwrap();
        assert_eq!(repository.stored_token().await.unwrap(), None);
    }
}
