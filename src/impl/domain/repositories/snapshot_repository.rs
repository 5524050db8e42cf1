use async_trait::async_trait;

use crate::entities::RootState;

/// Durable mirror of the whitelisted part of the state tree. None of these
/// operations fail from the caller's point of view: write failures are
/// logged and swallowed, and unreadable data rehydrates as defaults.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    async fn persist(&self, state: &RootState);

    /// Full tree: persisted slices restored and migrated, everything else at
    /// its initial state.
    async fn rehydrate(&self) -> RootState;

    async fn purge(&self);
}
