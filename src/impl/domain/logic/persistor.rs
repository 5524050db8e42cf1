use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::debug;

use crate::{
    domain::repositories::snapshot_repository::SnapshotRepository, entities::RootState,
};

/// Background writer mirroring the state tree to durable storage. Each change
/// wakes it; it waits out the debounce window and writes whatever is current
/// by then, so bursts of actions collapse into one write. The task ends on
/// its own once the store (the channel's sender) is dropped, after writing
/// the last pending change.
pub(crate) struct Persistor {
    snapshots: Arc<dyn SnapshotRepository>,
}

impl Persistor {
    pub(crate) fn spawn(
        receiver: watch::Receiver<RootState>,
        snapshots: Arc<dyn SnapshotRepository>,
        debounce: Duration,
    ) -> Self {
        tokio::spawn(Self::run(receiver, snapshots.clone(), debounce));
        Self { snapshots }
    }

    async fn run(
        mut receiver: watch::Receiver<RootState>,
        snapshots: Arc<dyn SnapshotRepository>,
        debounce: Duration,
    ) {
        while receiver.changed().await.is_ok() {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            let snapshot = receiver.borrow_and_update().clone();
            snapshots.persist(&snapshot).await;
        }
        debug!("State channel closed; persistor stopped.");
    }

    pub(crate) async fn persist_now(&self, state: &RootState) {
        self.snapshots.persist(state).await;
    }

    pub(crate) async fn purge(&self) {
        self.snapshots.purge().await;
    }
}
