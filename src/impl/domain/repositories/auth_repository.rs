use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{Credentials, LoginOutcome, Registration, RequestFailure};

/// Authentication round-trips plus custody of the session token, which lives
/// only in the secure-token collaborator.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Authenticates and stores the returned token securely.
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, RequestFailure>;

    /// Creates an account. The issued token is stored like a login's.
    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<LoginOutcome, RequestFailure>;

    /// Forgets the stored token.
    async fn logout(&self) -> Result<(), ServerError>;

    async fn stored_token(&self) -> Result<Option<String>, ServerError>;
}
