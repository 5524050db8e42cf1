use super::{entity::Entity, request::RequestSeq};

/// One normalized entity slice: the cached list plus the status of the most
/// recently dispatched request against it.
#[derive(Debug, Clone)]
pub struct CollectionState<T: Entity> {
    /// Server (or insertion) order; not guaranteed sorted.
    pub list: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub(crate) latest_request: Option<RequestSeq>,
    /// Requests at or below this sequence were issued before the last reset.
    pub(crate) retired_through: Option<RequestSeq>,
}

impl<T: Entity> CollectionState<T> {
    pub fn with_list(list: Vec<T>) -> Self {
        Self {
            list,
            ..Default::default()
        }
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.list.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T: Entity> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            loading: false,
            error: None,
            latest_request: None,
            retired_through: None,
        }
    }
}

// The request sequence is bookkeeping, not observable state.
impl<T: Entity> PartialEq for CollectionState<T> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list && self.loading == other.loading && self.error == other.error
    }
}
