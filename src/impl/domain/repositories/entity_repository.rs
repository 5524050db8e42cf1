use async_trait::async_trait;

use crate::entities::{Entity, RequestFailure};

/// Network collaborator for one entity collection. A failure's message is
/// what the store records on the collection.
#[async_trait]
pub trait EntityRepository<T: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<T>, RequestFailure>;

    async fn create(&self, draft: &T::Draft) -> Result<T, RequestFailure>;

    async fn update(&self, id: &T::Id, record: &T) -> Result<T, RequestFailure>;

    async fn delete(&self, id: &T::Id) -> Result<(), RequestFailure>;
}
