use chrono::{DateTime, Utc};

use super::{
    account::Account,
    category::Category,
    entity::Entity,
    goal::{Goal, GoalId},
    recurring_index::Frequency,
    request::Request,
    session::{LoginOutcome, User},
    theme::ThemeMode,
    transaction::{Transaction, TransactionId},
};

/// Everything the store accepts through `dispatch`. Reducers are the only
/// code that mutates the state tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(SessionAction),
    Theme(ThemeAction),
    Transactions(CollectionAction<Transaction>),
    Categories(CollectionAction<Category>),
    Accounts(CollectionAction<Account>),
    Goals(CollectionAction<Goal>),
    ContributeToGoal { id: GoalId, amount: f64 },
    Recurring(RecurringAction),
    /// Drops every slice back to its initial state. Requests issued before
    /// the reset no longer settle into the tree.
    Reset,
}

/// Server-confirmed result of a collection request.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOutcome<T: Entity> {
    Fetched(Vec<T>),
    Created(T),
    Updated(T),
    Deleted(T::Id),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionAction<T: Entity> {
    Request(Request<CollectionOutcome<T>>),
    AddLocal(T),
    UpdateLocal(T),
    RemoveLocal(T::Id),
}

#[derive(Clone, PartialEq)]
pub enum SessionAction {
    Login(Request<LoginOutcome>),
    LoginLocal { user: User, token: String },
    Logout,
    /// Cold-start check against the secure-token collaborator.
    Restored { has_token: bool },
}

impl std::fmt::Debug for SessionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login(request) => f.debug_tuple("Login").field(request).finish(),
            Self::LoginLocal { user, .. } => f
                .debug_struct("LoginLocal")
                .field("user", user)
                .field("token", &"<redacted>")
                .finish(),
            Self::Logout => f.write_str("Logout"),
            Self::Restored { has_token } => f
                .debug_struct("Restored")
                .field("has_token", has_token)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Set(ThemeMode),
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecurringAction {
    Mark {
        id: TransactionId,
        frequency: Frequency,
        at: DateTime<Utc>,
    },
    UpdateFrequency {
        id: TransactionId,
        frequency: Frequency,
    },
    Unmark(TransactionId),
    ClearAll,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RequestSeq;

    #[test]
    fn session_actions_never_print_tokens() {
        let local = Action::Auth(SessionAction::LoginLocal {
            user: User::default(),
            token: "local-jwt".to_string(),
        });
        let fulfilled = Action::Auth(SessionAction::Login(Request::fulfilled(
            RequestSeq(4),
            LoginOutcome {
                token: "server-jwt".to_string(),
                user: None,
            },
        )));
        for action in [local, fulfilled] {
            let printed = format!("{action:?}");
            assert!(!printed.contains("jwt"), "token printed: {printed}");
        }
    }
}
