use std::sync::Arc;

use chrono::Utc;
use fractic_server_error::ServerError;
use futures::future::join4;
use tracing::{info, warn};

use crate::{
    config::StoreConfig,
    data::{
        datasources::{
            key_value_storage_datasource::KeyValueStorage, rest_api_datasource::RestApiDatasource,
            secure_token_datasource::SecureTokenStorage,
        },
        repositories::{
            auth_repository_impl::AuthRepositoryImpl, entity_repository_impl::EntityRepositoryImpl,
            snapshot_repository_impl::SnapshotRepositoryImpl,
        },
    },
    domain::{
        logic::store::Store,
        repositories::{auth_repository::AuthRepository, entity_repository::EntityRepository},
        usecases::{
            collection_usecase::{CollectionUsecase, CollectionUsecaseImpl},
            session_usecase::{SessionUsecase, SessionUsecaseImpl},
        },
    },
    entities::{
        Account, Action, Category, Frequency, Goal, GoalId, RecurringAction, RequestFailure,
        ThemeAction, ThemeMode, Transaction, TransactionId,
    },
};

/// Network collaborators, one per collection plus authentication.
pub struct Repositories {
    pub transactions: Arc<dyn EntityRepository<Transaction>>,
    pub categories: Arc<dyn EntityRepository<Category>>,
    pub accounts: Arc<dyn EntityRepository<Account>>,
    pub goals: Arc<dyn EntityRepository<Goal>>,
    pub auth: Arc<dyn AuthRepository>,
}

pub struct FinanceStoreUtil {
    store: Arc<Store>,
    transactions: CollectionUsecaseImpl<Transaction>,
    categories: CollectionUsecaseImpl<Category>,
    accounts: CollectionUsecaseImpl<Account>,
    goals: CollectionUsecaseImpl<Goal>,
    session: SessionUsecaseImpl,
}

impl FinanceStoreUtil {
    /// Rehydrates from `storage`, wires the REST adapter and reconciles the
    /// session with the secure token store.
    pub async fn open(
        config: StoreConfig,
        storage: Arc<dyn KeyValueStorage>,
        tokens: Arc<dyn SecureTokenStorage>,
    ) -> Result<Self, ServerError> {
        let api = Arc::new(RestApiDatasource::new(config.api.clone(), tokens)?);
        let snapshots = Arc::new(SnapshotRepositoryImpl::new(storage, config.persist.clone())?);
        let store = Arc::new(Store::open(&config.persist, snapshots).await);
        let util = Self::with_repositories(
            store,
            Repositories {
                transactions: Arc::new(EntityRepositoryImpl::new(api.clone())),
                categories: Arc::new(EntityRepositoryImpl::new(api.clone())),
                accounts: Arc::new(EntityRepositoryImpl::new(api.clone())),
                goals: Arc::new(EntityRepositoryImpl::new(api.clone())),
                auth: Arc::new(AuthRepositoryImpl::new(api)),
            },
        );
        if let Err(e) = util.session.restore().await {
            warn!(error = %e, "Could not read stored session token.");
        }
        info!(prefix = %config.persist.key_prefix, "Finance store ready.");
        Ok(util)
    }

    pub fn with_repositories(store: Arc<Store>, repositories: Repositories) -> Self {
        Self {
            transactions: CollectionUsecaseImpl::new(store.clone(), repositories.transactions),
            categories: CollectionUsecaseImpl::new(store.clone(), repositories.categories),
            accounts: CollectionUsecaseImpl::new(store.clone(), repositories.accounts),
            goals: CollectionUsecaseImpl::new(store.clone(), repositories.goals),
            session: SessionUsecaseImpl::new(store.clone(), repositories.auth),
            store,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn transactions(&self) -> &dyn CollectionUsecase<Transaction> {
        &self.transactions
    }

    pub fn categories(&self) -> &dyn CollectionUsecase<Category> {
        &self.categories
    }

    pub fn accounts(&self) -> &dyn CollectionUsecase<Account> {
        &self.accounts
    }

    pub fn goals(&self) -> &dyn CollectionUsecase<Goal> {
        &self.goals
    }

    pub fn session(&self) -> &dyn SessionUsecase {
        &self.session
    }

    /// Fetches every collection concurrently. Each collection records its own
    /// outcome; the first failure is also returned.
    pub async fn refresh_all(&self) -> Result<(), RequestFailure> {
        let (transactions, categories, accounts, goals) = join4(
            self.transactions.fetch_all(),
            self.categories.fetch_all(),
            self.accounts.fetch_all(),
            self.goals.fetch_all(),
        )
        .await;
        transactions?;
        categories?;
        accounts?;
        goals?;
        Ok(())
    }

    // Recurring-expense index.

    pub fn mark_recurring(&self, id: TransactionId, frequency: Frequency) {
        self.store.dispatch(Action::Recurring(RecurringAction::Mark {
            id,
            frequency,
            at: Utc::now(),
        }));
    }

    pub fn update_frequency(&self, id: TransactionId, frequency: Frequency) {
        self.store
            .dispatch(Action::Recurring(RecurringAction::UpdateFrequency { id, frequency }));
    }

    pub fn unmark_recurring(&self, id: TransactionId) {
        self.store
            .dispatch(Action::Recurring(RecurringAction::Unmark(id)));
    }

    pub fn clear_recurring(&self) {
        self.store.dispatch(Action::Recurring(RecurringAction::ClearAll));
    }

    // Local-only updates.

    pub fn contribute_to_goal(&self, id: GoalId, amount: f64) {
        self.store.dispatch(Action::ContributeToGoal { id, amount });
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        self.store.dispatch(Action::Theme(ThemeAction::Set(mode)));
    }

    pub fn toggle_theme(&self) {
        self.store.dispatch(Action::Theme(ThemeAction::Toggle));
    }

    pub async fn flush(&self) {
        self.store.flush().await;
    }

    /// Logs out, then wipes in-memory and persisted state.
    pub async fn purge(&self) -> Result<(), ServerError> {
        let result = self.session.logout().await;
        self.store.purge().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::{
        data::datasources::{
            key_value_storage_datasource::InMemoryStorage,
            secure_token_datasource::InMemoryTokenStorage,
        },
        entities::{
            CategoryDraft, Credentials, LoginOutcome, PersistConfig, Registration, RootState,
        },
        errors::RequestFailed,
    };

    struct Offline;

    fn network_error() -> RequestFailure {
        RequestFailure::network(RequestFailed::new("connection refused"))
    }

    #[async_trait]
    impl<T: crate::entities::Entity> EntityRepository<T> for Offline {
        async fn get_all(&self) -> Result<Vec<T>, RequestFailure> {
            Err(network_error())
        }

        async fn create(&self, _draft: &T::Draft) -> Result<T, RequestFailure> {
            Err(network_error())
        }

        async fn update(&self, _id: &T::Id, _record: &T) -> Result<T, RequestFailure> {
            Err(network_error())
        }

        async fn delete(&self, _id: &T::Id) -> Result<(), RequestFailure> {
            Err(network_error())
        }
    }

    #[async_trait]
    impl AuthRepository for Offline {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginOutcome, RequestFailure> {
            Err(network_error())
        }

        async fn register(
            &self,
            _registration: &Registration,
        ) -> Result<LoginOutcome, RequestFailure> {
            Err(network_error())
        }

        async fn logout(&self) -> Result<(), ServerError> {
            Ok(())
        }

        async fn stored_token(&self) -> Result<Option<String>, ServerError> {
            Ok(None)
        }
    }

    fn offline() -> Repositories {
        Repositories {
            transactions: Arc::new(Offline),
            categories: Arc::new(Offline),
            accounts: Arc::new(Offline),
            goals: Arc::new(Offline),
            auth: Arc::new(Offline),
        }
    }

    fn persist_config() -> PersistConfig {
        PersistConfig {
            debounce_ms: 0,
            ..PersistConfig::default()
        }
    }

    async fn open(storage: Arc<InMemoryStorage>, config: &PersistConfig) -> FinanceStoreUtil {
        let snapshots = Arc::new(SnapshotRepositoryImpl::new(storage, config.clone()).unwrap());
        let store = Arc::new(Store::open(config, snapshots).await);
        FinanceStoreUtil::with_repositories(store, offline())
    }

    #[tokio::test]
    async fn mark_then_unmark_leaves_no_trace() {
        let util = FinanceStoreUtil::with_repositories(
            Arc::new(Store::new(RootState::default())),
            offline(),
        );

        util.mark_recurring(42, Frequency::Weekly);
        util.mark_recurring(42, Frequency::Weekly);
        assert_eq!(util.store().select(|s| s.recurring.recurring_ids().len()), 1);

        util.unmark_recurring(42);
        let recurring = util.store().select(|s| s.recurring.clone());
        assert!(!recurring.recurring_ids().contains(&42));
        assert!(recurring.config_for(42).is_none());
    }

    #[tokio::test]
    async fn categories_fetch_failure_is_recorded() {
        let util = FinanceStoreUtil::with_repositories(
            Arc::new(Store::new(RootState::default())),
            offline(),
        );

        assert!(util.refresh_all().await.is_err());
        let state = util.store().state();
        assert!(state.categories.list.is_empty());
        assert!(!state.categories.loading);
        assert_eq!(state.categories.error.as_deref(), Some("Network Error"));
        assert_eq!(state.goals.error.as_deref(), Some("Network Error"));
    }

    #[tokio::test]
    async fn failed_create_leaves_list_unchanged() {
        let util = FinanceStoreUtil::with_repositories(
            Arc::new(Store::new(RootState::default())),
            offline(),
        );
        let draft = CategoryDraft {
            key: "food".into(),
            name: "Comida".into(),
            icon: String::new(),
            color_fill: String::new(),
            color_bg: String::new(),
            transaction_type: Default::default(),
        };
        assert!(util.categories().create(draft).await.is_err());
        assert!(util.store().select(|s| s.categories.is_empty()));
    }

    #[tokio::test]
    async fn flushed_state_survives_reopen() {
        let storage = Arc::new(InMemoryStorage::new());
        let config = persist_config();
        {
            let util = open(storage.clone(), &config).await;
            util.mark_recurring(42, Frequency::Monthly);
            util.set_theme(ThemeMode::Dark);
            util.flush().await;
        }

        let reopened = open(storage, &config).await;
        let state = reopened.store().state();
        assert!(state.recurring.is_recurring(42));
        assert_eq!(state.theme.mode, ThemeMode::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn changes_are_written_after_debounce() {
        let storage = Arc::new(InMemoryStorage::new());
        let config = PersistConfig {
            debounce_ms: 250,
            ..PersistConfig::default()
        };
        let util = open(storage.clone(), &config).await;

        util.toggle_theme();
        assert_eq!(storage.get_item("persist:root").await.unwrap(), None);

        tokio::time::sleep(Duration::from_millis(300)).await;
        let root = storage.get_item("persist:root").await.unwrap().unwrap();
        assert!(root.contains("dark"));
    }

    #[tokio::test]
    async fn purge_wipes_memory_and_storage() {
        let storage = Arc::new(InMemoryStorage::new());
        let config = persist_config();
        let util = open(storage.clone(), &config).await;
        util.mark_recurring(7, Frequency::Yearly);
        util.flush().await;

        util.purge().await.unwrap();

        assert!(util.store().select(|s| s.recurring.is_empty()));
        assert_eq!(storage.get_item("persist:recurring").await.unwrap(), None);
    }

    #[tokio::test]
    async fn open_wires_rest_adapter_and_restores_session() {
        let storage = Arc::new(InMemoryStorage::new());
        storage
            .set_item(
                "persist:auth",
                r#"{"version":1,"payload":{"isAuthenticated":true,"user":null}}"#,
            )
            .await
            .unwrap();

        let util = FinanceStoreUtil::open(
            StoreConfig::default(),
            storage,
            Arc::new(InMemoryTokenStorage::new()),
        )
        .await
        .unwrap();
        assert!(!util.store().select(|s| s.auth.is_authenticated));

        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        util.store().dispatch(Action::Transactions(crate::entities::CollectionAction::AddLocal(
            Transaction {
                id: 1,
                account_id: 1,
                user_id: String::new(),
                category_id: 1,
                amount: 10.0,
                transaction_type: Default::default(),
                description: "local".into(),
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                created_at: at,
                updated_at: at,
            },
        )));
        assert_eq!(util.store().select(|s| s.transactions.list.len()), 1);
    }

    #[tokio::test]
    async fn unreachable_backend_records_network_error() {
        let mut config = StoreConfig::default();
        config.api.main_base_url = "http://127.0.0.1:9".to_string();
        config.api.timeout_ms = 2_000;
        let util = FinanceStoreUtil::open(
            config,
            Arc::new(InMemoryStorage::new()),
            Arc::new(InMemoryTokenStorage::new()),
        )
        .await
        .unwrap();

        let failure = util.categories().fetch_all().await.unwrap_err();
        assert_eq!(failure.message(), "Network Error");
        let categories = util.store().select(|s| s.categories.clone());
        assert!(categories.list.is_empty());
        assert!(!categories.loading);
        assert_eq!(categories.error.as_deref(), Some("Network Error"));
    }
}
