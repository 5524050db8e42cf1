use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    data::{
        datasources::key_value_storage_datasource::KeyValueStorage,
        models::{
            collection_model::CollectionModel, envelope_model::EnvelopeModel,
            recurring_index_model::RecurringIndexModel, session_model::SessionModel,
        },
        repositories::snapshot_migrations::{auth_chain, recurring_chain, root_chain},
    },
    domain::{logic::migration::MigrationChain, repositories::snapshot_repository::SnapshotRepository},
    entities::{
        Account, Category, CollectionState, Entity, Goal, PersistConfig, RecurringIndex,
        RootState, SliceKey, ThemeState, Transaction,
    },
    errors::{InvalidPersistedPayload, StorageWriteError},
};

/// Snapshot gateway over a key-value store. Layout:
///
/// - `<prefix>:root`: one envelope holding every whitelisted slice that has
///   no envelope of its own, keyed by slice name.
/// - `<prefix>:auth`, `<prefix>:recurring`: one envelope each, versioned
///   independently.
pub(crate) struct SnapshotRepositoryImpl {
    storage: Arc<dyn KeyValueStorage>,
    config: PersistConfig,
    root: MigrationChain,
    auth: MigrationChain,
    recurring: MigrationChain,
}

impl SnapshotRepositoryImpl {
    pub(crate) fn new(
        storage: Arc<dyn KeyValueStorage>,
        config: PersistConfig,
    ) -> Result<Self, ServerError> {
        let root = root_chain();
        let auth = auth_chain();
        let recurring = recurring_chain();
        root.validate()?;
        auth.validate()?;
        recurring.validate()?;
        Ok(Self {
            storage,
            config,
            root,
            auth,
            recurring,
        })
    }

    async fn write(&self, key: &str, chain: &MigrationChain, payload: Result<Value, ServerError>) {
        let text = payload.and_then(|p| EnvelopeModel::new(chain.current_version(), p).to_text(key));
        let result = match text {
            Ok(text) => self.storage.set_item(key, &text).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => debug!(key, "Snapshot written."),
            Err(e) => warn!(key, error = %e, "Failed to persist snapshot; keeping in-memory state."),
        }
    }

    /// Migrated payload stored under `key`, or `None` when absent or
    /// unusable. Unusable data is logged and treated as absent.
    async fn read(&self, key: &str, chain: &MigrationChain) -> Option<Value> {
        let text = match self.storage.get_item(key).await {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read snapshot; using defaults.");
                return None;
            }
        };
        let migrated = EnvelopeModel::parse(key, &text)
            .and_then(|(version, payload)| chain.migrate(version, payload));
        match migrated {
            Ok((version, payload)) => {
                debug!(key, chain = chain.name(), version, "Snapshot loaded.");
                Some(payload)
            }
            Err(e) => {
                warn!(key, error = %e, "Unusable snapshot; using defaults.");
                None
            }
        }
    }

    fn root_payload(&self, state: &RootState) -> Result<Value, ServerError> {
        let mut slices = Map::new();
        for slice in self.config.root_slices() {
            let value = match slice {
                SliceKey::Theme => encode(slice, &state.theme)?,
                SliceKey::Transactions => encode_collection(slice, &state.transactions)?,
                SliceKey::Categories => encode_collection(slice, &state.categories)?,
                SliceKey::Accounts => encode_collection(slice, &state.accounts)?,
                SliceKey::Goals => encode_collection(slice, &state.goals)?,
                SliceKey::Auth | SliceKey::Recurring => continue,
            };
            slices.insert(slice.as_str().to_string(), value);
        }
        Ok(Value::Object(slices))
    }

    fn restore_root(&self, state: &mut RootState, payload: Value) {
        let Value::Object(mut slices) = payload else {
            warn!("Root snapshot is not an object; using defaults.");
            return;
        };
        for slice in self.config.root_slices() {
            let Some(value) = slices.remove(slice.as_str()) else {
                continue;
            };
            let restored = match slice {
                SliceKey::Theme => {
                    decode::<ThemeState>(slice, value).map(|theme| state.theme = theme)
                }
                SliceKey::Transactions => {
                    decode_collection::<Transaction>(slice, value).map(|c| state.transactions = c)
                }
                SliceKey::Categories => {
                    decode_collection::<Category>(slice, value).map(|c| state.categories = c)
                }
                SliceKey::Accounts => {
                    decode_collection::<Account>(slice, value).map(|c| state.accounts = c)
                }
                SliceKey::Goals => decode_collection::<Goal>(slice, value).map(|c| state.goals = c),
                SliceKey::Auth | SliceKey::Recurring => Ok(()),
            };
            if let Err(e) = restored {
                warn!(slice = slice.as_str(), error = %e, "Unusable slice; using defaults.");
            }
        }
    }
}

fn encode<V: Serialize>(slice: SliceKey, value: &V) -> Result<Value, ServerError> {
    serde_json::to_value(value).map_err(|e| StorageWriteError::with_debug(slice.as_str(), &e))
}

fn encode_collection<T: Entity>(
    slice: SliceKey,
    state: &CollectionState<T>,
) -> Result<Value, ServerError> {
    encode(slice, &CollectionModel::from(state))
}

fn decode<V: DeserializeOwned>(slice: SliceKey, value: Value) -> Result<V, ServerError> {
    serde_json::from_value(value).map_err(|e| {
        InvalidPersistedPayload::with_debug(slice.as_str(), "shape mismatch", &e)
    })
}

fn decode_collection<T: Entity>(
    slice: SliceKey,
    value: Value,
) -> Result<CollectionState<T>, ServerError> {
    decode::<CollectionModel<T>>(slice, value).map(CollectionState::from)
}

#[async_trait]
impl SnapshotRepository for SnapshotRepositoryImpl {
    async fn persist(&self, state: &RootState) {
        if !self.config.root_slices().is_empty() {
            let payload = self.root_payload(state);
            self.write(&self.config.root_key(), &self.root, payload).await;
        }
        if self.config.persists(SliceKey::Auth) {
            let payload = encode(SliceKey::Auth, &SessionModel::from(&state.auth));
            self.write(&self.config.slice_key(SliceKey::Auth), &self.auth, payload)
                .await;
        }
        if self.config.persists(SliceKey::Recurring) {
            let payload = encode(
                SliceKey::Recurring,
                &RecurringIndexModel::from(&state.recurring),
            );
            self.write(
                &self.config.slice_key(SliceKey::Recurring),
                &self.recurring,
                payload,
            )
            .await;
        }
    }

    async fn rehydrate(&self) -> RootState {
        let mut state = RootState::default();

        if !self.config.root_slices().is_empty() {
            if let Some(payload) = self.read(&self.config.root_key(), &self.root).await {
                self.restore_root(&mut state, payload);
            }
        }

        if self.config.persists(SliceKey::Auth) {
            let key = self.config.slice_key(SliceKey::Auth);
            if let Some(payload) = self.read(&key, &self.auth).await {
                match decode::<SessionModel>(SliceKey::Auth, payload) {
                    Ok(session) => state.auth = session.into(),
                    Err(e) => warn!(key = %key, error = %e, "Unusable session; using defaults."),
                }
            }
        }

        if self.config.persists(SliceKey::Recurring) {
            let key = self.config.slice_key(SliceKey::Recurring);
            if let Some(payload) = self.read(&key, &self.recurring).await {
                match decode::<RecurringIndexModel>(SliceKey::Recurring, payload)
                    .and_then(RecurringIndex::try_from)
                {
                    Ok(index) => state.recurring = index,
                    Err(e) => warn!(key = %key, error = %e, "Unusable recurring index; using defaults."),
                }
            }
        }

        state
    }

    async fn purge(&self) {
        let keys = [
            self.config.root_key(),
            self.config.slice_key(SliceKey::Auth),
            self.config.slice_key(SliceKey::Recurring),
        ];
        for key in keys {
            if let Err(e) = self.storage.remove_item(&key).await {
                warn!(key = %key, error = %e, "Failed to remove snapshot.");
            }
        }
    }
}
