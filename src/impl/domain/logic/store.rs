use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::watch;
use tracing::info;

use crate::{
    domain::{logic::persistor::Persistor, repositories::snapshot_repository::SnapshotRepository},
    entities::{Action, PersistConfig, RequestSeq, RootState},
};

/// Owner of the state tree. UI collaborators read snapshots and dispatch
/// actions; reducers run synchronously inside `dispatch`, one at a time, in
/// dispatch order. Share it by `Arc`.
pub struct Store {
    state: watch::Sender<RootState>,
    next_seq: AtomicU64,
    persistor: Option<Persistor>,
}

impl Store {
    /// In-memory store with no durable mirror.
    pub fn new(initial: RootState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            next_seq: AtomicU64::new(0),
            persistor: None,
        }
    }

    /// Rehydrates from `snapshots` and starts mirroring changes back to it.
    /// The store accepts no action until rehydration has completed.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn open(config: &PersistConfig, snapshots: Arc<dyn SnapshotRepository>) -> Self {
        let initial = snapshots.rehydrate().await;
        info!("State rehydrated; store open.");
        let (state, receiver) = watch::channel(initial);
        Self {
            state,
            next_seq: AtomicU64::new(0),
            persistor: Some(Persistor::spawn(receiver, snapshots, config.debounce())),
        }
    }

    pub fn dispatch(&self, action: Action) {
        self.state.send_if_modified(|state| state.reduce(action));
    }

    /// Owned copy of the current tree.
    pub fn state(&self) -> RootState {
        self.state.borrow().clone()
    }

    pub fn select<R>(&self, f: impl FnOnce(&RootState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver notified after every action that changed the tree.
    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.state.subscribe()
    }

    /// Writes the current tree to durable storage now, bypassing the
    /// debounce. No-op for in-memory stores.
    pub async fn flush(&self) {
        if let Some(persistor) = &self.persistor {
            let snapshot = self.state();
            persistor.persist_now(&snapshot).await;
        }
    }

    /// Resets every slice to its initial state and removes the persisted
    /// snapshot.
    pub async fn purge(&self) {
        self.dispatch(Action::Reset);
        if let Some(persistor) = &self.persistor {
            persistor.purge().await;
        }
    }

    pub(crate) fn next_seq(&self) -> RequestSeq {
        RequestSeq(self.next_seq.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
