use serde_derive::{Deserialize, Serialize};

use crate::entities::{SessionState, User};

/// Persisted part of the session slice. Has no token field; the token lives
/// only in secure storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SessionModel {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl From<&SessionState> for SessionModel {
    fn from(state: &SessionState) -> Self {
        Self {
            is_authenticated: state.is_authenticated,
            user: state.user.clone(),
        }
    }
}

impl From<SessionModel> for SessionState {
    fn from(model: SessionModel) -> Self {
        Self {
            is_authenticated: model.is_authenticated,
            user: model.user,
            ..Default::default()
        }
    }
}
