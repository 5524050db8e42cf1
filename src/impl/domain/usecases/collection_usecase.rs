use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::{
    domain::{
        logic::{
            lifecycle::{collection_request, PendingRequest},
            root_reducer::Collection,
            store::Store,
        },
        repositories::entity_repository::EntityRepository,
    },
    entities::{CollectionOutcome, Entity, RequestFailure},
};

/// Network-backed operations on one collection. Each call moves the slice
/// through pending and then exactly one of fulfilled/rejected. A failure's
/// message is recorded on the slice's `error` and the failure is also
/// returned to the caller; nothing is retried here.
#[async_trait]
pub trait CollectionUsecase<T: Entity>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>, RequestFailure>;

    async fn create(&self, draft: T::Draft) -> Result<T, RequestFailure>;

    async fn update(&self, record: T) -> Result<T, RequestFailure>;

    async fn delete(&self, id: T::Id) -> Result<T::Id, RequestFailure>;
}

pub struct CollectionUsecaseImpl<T: Entity> {
    store: Arc<Store>,
    repository: Arc<dyn EntityRepository<T>>,
}

impl<T: Entity> CollectionUsecaseImpl<T> {
    pub fn new(store: Arc<Store>, repository: Arc<dyn EntityRepository<T>>) -> Self {
        Self { store, repository }
    }
}

fn rejected<T: Entity, P>(request: PendingRequest<'_, P>, op: &str, failure: &RequestFailure) {
    warn!(collection = T::COLLECTION, op, error = %failure.error(), "Request rejected.");
    request.reject(failure.message());
}

#[async_trait]
impl<T: Collection> CollectionUsecase<T> for CollectionUsecaseImpl<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, RequestFailure> {
        let request = PendingRequest::begin(&self.store, collection_request::<T>);
        match self.repository.get_all().await {
            Ok(list) => {
                request.fulfil(CollectionOutcome::Fetched(list.clone()));
                Ok(list)
            }
            Err(e) => {
                rejected::<T, _>(request, "fetch_all", &e);
                Err(e)
            }
        }
    }

    async fn create(&self, draft: T::Draft) -> Result<T, RequestFailure> {
        let request = PendingRequest::begin(&self.store, collection_request::<T>);
        match self.repository.create(&draft).await {
            Ok(record) => {
                request.fulfil(CollectionOutcome::Created(record.clone()));
                Ok(record)
            }
            Err(e) => {
                rejected::<T, _>(request, "create", &e);
                Err(e)
            }
        }
    }

    async fn update(&self, record: T) -> Result<T, RequestFailure> {
        let request = PendingRequest::begin(&self.store, collection_request::<T>);
        match self.repository.update(record.id(), &record).await {
            Ok(updated) => {
                request.fulfil(CollectionOutcome::Updated(updated.clone()));
                Ok(updated)
            }
            Err(e) => {
                rejected::<T, _>(request, "update", &e);
                Err(e)
            }
        }
    }

    async fn delete(&self, id: T::Id) -> Result<T::Id, RequestFailure> {
        let request = PendingRequest::begin(&self.store, collection_request::<T>);
        match self.repository.delete(&id).await {
            Ok(()) => {
                request.fulfil(CollectionOutcome::Deleted(id.clone()));
                Ok(id)
            }
            Err(e) => {
                rejected::<T, _>(request, "delete", &e);
                Err(e)
            }
        }
    }
}
