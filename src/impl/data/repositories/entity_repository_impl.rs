use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    data::datasources::rest_api_datasource::{RestApiDatasource, Service},
    domain::repositories::entity_repository::EntityRepository,
    entities::{Entity, RequestFailure},
};

/// REST collection under `/api/<collection>` on the main service.
pub(crate) struct EntityRepositoryImpl<T: Entity> {
    api: Arc<RestApiDatasource>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Entity> EntityRepositoryImpl<T> {
    pub(crate) fn new(api: Arc<RestApiDatasource>) -> Self {
        Self {
            api,
            _phantom: std::marker::PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("/api/{}", T::COLLECTION)
    }

    fn record_path(id: &T::Id) -> String {
        format!("/api/{}/{}", T::COLLECTION, id)
    }
}

#[async_trait]
impl<T: Entity> EntityRepository<T> for EntityRepositoryImpl<T> {
    async fn get_all(&self) -> Result<Vec<T>, RequestFailure> {
        self.api.get(Service::Main, &Self::collection_path()).await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, RequestFailure> {
        self.api
            .post(Service::Main, &Self::collection_path(), draft)
            .await
    }

    async fn update(&self, id: &T::Id, record: &T) -> Result<T, RequestFailure> {
        self.api
            .put(Service::Main, &Self::record_path(id), record)
            .await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RequestFailure> {
        self.api.delete(Service::Main, &Self::record_path(id)).await
    }
}
