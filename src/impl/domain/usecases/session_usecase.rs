use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::{info, warn};

use crate::{
    domain::{
        logic::{
            lifecycle::{login_request, PendingRequest},
            store::Store,
        },
        repositories::auth_repository::AuthRepository,
    },
    entities::{Action, Credentials, LoginOutcome, Registration, RequestFailure, SessionAction},
};

#[async_trait]
pub trait SessionUsecase: Send + Sync {
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, RequestFailure>;

    /// Signs up and, with the token the server issues, logs in. Shares the
    /// login lifecycle on the session slice.
    async fn register(&self, registration: Registration) -> Result<LoginOutcome, RequestFailure>;

    /// Clears the session slice even if forgetting the stored token fails.
    async fn logout(&self) -> Result<(), ServerError>;

    /// Reconciles a rehydrated `is_authenticated` flag with the secure token
    /// store. Returns whether a token is present.
    async fn restore(&self) -> Result<bool, ServerError>;
}

pub struct SessionUsecaseImpl {
    store: Arc<Store>,
    repository: Arc<dyn AuthRepository>,
}

impl SessionUsecaseImpl {
    pub fn new(store: Arc<Store>, repository: Arc<dyn AuthRepository>) -> Self {
        Self { store, repository }
    }
}

fn settle(
    request: PendingRequest<'_, LoginOutcome>,
    result: Result<LoginOutcome, RequestFailure>,
) -> Result<LoginOutcome, RequestFailure> {
    match result {
        Ok(outcome) => {
            request.fulfil(outcome.clone());
            Ok(outcome)
        }
        Err(failure) => {
            warn!(error = %failure.error(), "Login rejected.");
            request.reject(failure.message());
            Err(failure)
        }
    }
}

#[async_trait]
impl SessionUsecase for SessionUsecaseImpl {
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, RequestFailure> {
        let request = PendingRequest::begin(&self.store, login_request);
        let outcome = settle(request, self.repository.login(&credentials).await)?;
        info!(login = ?credentials.login, "Logged in.");
        Ok(outcome)
    }

    async fn register(&self, registration: Registration) -> Result<LoginOutcome, RequestFailure> {
        let request = PendingRequest::begin(&self.store, login_request);
        let outcome = settle(request, self.repository.register(&registration).await)?;
        info!(email = %registration.email, "Registered.");
        Ok(outcome)
    }

    async fn logout(&self) -> Result<(), ServerError> {
        let result = self.repository.logout().await;
        self.store.dispatch(Action::Auth(SessionAction::Logout));
        if let Err(e) = &result {
            warn!(error = %e, "Failed to forget stored token on logout.");
        }
        result
    }

    async fn restore(&self) -> Result<bool, ServerError> {
        let has_token = self.repository.stored_token().await?.is_some();
        self.store
            .dispatch(Action::Auth(SessionAction::Restored { has_token }));
        Ok(has_token)
    }
}
