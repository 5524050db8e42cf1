use fractic_server_error::ServerError;
use serde_derive::Deserialize;

use crate::{
    entities::{LoginOutcome, User},
    errors::MissingToken,
};

/// Body of `POST /auth/login`. Deployments disagree on the token's field
/// name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponseModel {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl TryFrom<LoginResponseModel> for LoginOutcome {
    type Error = ServerError;

    fn try_from(model: LoginResponseModel) -> Result<Self, Self::Error> {
        let token = model
            .token
            .or(model.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(MissingToken::new)?;
        Ok(LoginOutcome {
            token,
            user: model.user,
        })
    }
}
