use super::{
    account::Account, category::Category, collection_state::CollectionState, goal::Goal,
    recurring_index::RecurringIndex, session::SessionState, theme::ThemeState,
    transaction::Transaction,
};

/// The whole in-memory state tree. One field per slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: SessionState,
    pub theme: ThemeState,
    pub transactions: CollectionState<Transaction>,
    pub categories: CollectionState<Category>,
    pub accounts: CollectionState<Account>,
    pub goals: CollectionState<Goal>,
    pub recurring: RecurringIndex,
}
