use serde_derive::{Deserialize, Serialize};

use super::request::RequestSeq;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session status. `token` mirrors the secure-token collaborator for the
/// current run only and is never written to durable storage.
#[derive(Clone, Default)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub(crate) latest_request: Option<RequestSeq>,
    pub(crate) retired_through: Option<RequestSeq>,
}

/// How the user names their account at login. Serialized as a single
/// `email` or `username` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginId {
    Email(String),
    Username(String),
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(flatten)]
    pub login: LoginId,
    pub password: String,
}

/// Body of an account sign-up.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful login round-trip.
#[derive(Clone, PartialEq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: Option<User>,
}

// --

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: LoginId::Email(email.into()),
            password: password.into(),
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: LoginId::Username(username.into()),
            password: password.into(),
        }
    }
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl PartialEq for SessionState {
    fn eq(&self, other: &Self) -> bool {
        self.is_authenticated == other.is_authenticated
            && self.user == other.user
            && self.token == other.token
            && self.loading == other.loading
            && self.error == other.error
    }
}

fn redacted(token: &Option<String>) -> &'static str {
    match token {
        Some(_) => "Some(<redacted>)",
        None => "None",
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("is_authenticated", &self.is_authenticated)
            .field("user", &self.user)
            .field("token", &redacted(&self.token))
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for LoginOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginOutcome")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
