use tracing::debug;

use crate::entities::{
    Account, Action, Category, CollectionAction, CollectionState, Entity, Goal, GoalId,
    RecurringIndex, RootState, ThemeAction, ThemeMode, ThemeState, Transaction,
};

/// Binds an entity type to its slice in the state tree and its action
/// variant, so collection logic can stay generic.
pub trait Collection: Entity {
    fn select(state: &RootState) -> &CollectionState<Self>;
    fn wrap(action: CollectionAction<Self>) -> Action;
}

macro_rules! impl_collection {
    ($typ:ty, $variant:ident, $field:ident) => {
        impl Collection for $typ {
            fn select(state: &RootState) -> &CollectionState<Self> {
                &state.$field
            }

            fn wrap(action: CollectionAction<Self>) -> Action {
                Action::$variant(action)
            }
        }
    };
}

impl_collection!(Transaction, Transactions, transactions);
impl_collection!(Category, Categories, categories);
impl_collection!(Account, Accounts, accounts);
impl_collection!(Goal, Goals, goals);

impl RootState {
    /// Applies one action to the tree. Returns whether anything observable
    /// changed, which decides whether subscribers are notified.
    pub(crate) fn reduce(&mut self, action: Action) -> bool {
        match action {
            Action::Auth(a) => self.auth.reduce(a),
            Action::Theme(a) => self.theme.reduce(a),
            Action::Transactions(a) => self.transactions.reduce(a),
            Action::Categories(a) => self.categories.reduce(a),
            Action::Accounts(a) => self.accounts.reduce(a),
            Action::Goals(a) => self.goals.reduce(a),
            Action::ContributeToGoal { id, amount } => self.contribute_to_goal(&id, amount),
            Action::Recurring(a) => self.recurring.reduce(a),
            Action::Reset => {
                self.reset();
                true
            }
        }
    }

    fn reset(&mut self) {
        self.auth.reset();
        self.theme = ThemeState::default();
        self.transactions.reset();
        self.categories.reset();
        self.accounts.reset();
        self.goals.reset();
        self.recurring = RecurringIndex::default();
    }

    fn contribute_to_goal(&mut self, id: &GoalId, amount: f64) -> bool {
        match self.goals.list.iter_mut().find(|g| &g.id == id) {
            Some(goal) => {
                goal.saved_amount += amount;
                true
            }
            None => {
                debug!(goal = %id, "Contribution to unknown goal ignored.");
                false
            }
        }
    }
}

impl ThemeState {
    fn reduce(&mut self, action: ThemeAction) -> bool {
        let mode = match action {
            ThemeAction::Set(mode) => mode,
            ThemeAction::Toggle => match self.mode {
                ThemeMode::Light => ThemeMode::Dark,
                ThemeMode::Dark => ThemeMode::Light,
            },
        };
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }
}
