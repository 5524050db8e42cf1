use serde_derive::{Deserialize, Serialize};

use crate::entities::{CollectionState, Entity};

/// Persisted part of a collection slice. Status fields are transient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Entity")]
pub(crate) struct CollectionModel<T: Entity> {
    pub list: Vec<T>,
}

impl<T: Entity> From<&CollectionState<T>> for CollectionModel<T> {
    fn from(state: &CollectionState<T>) -> Self {
        Self {
            list: state.list.clone(),
        }
    }
}

impl<T: Entity> From<CollectionModel<T>> for CollectionState<T> {
    fn from(model: CollectionModel<T>) -> Self {
        CollectionState::with_list(model.list)
    }
}
