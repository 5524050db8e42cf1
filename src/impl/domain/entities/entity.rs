use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use serde::{de::DeserializeOwned, Serialize};

/// Where a newly created record lands in its collection's list. This is a UI
/// ordering convention only; nothing relies on the list being sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Front,
    Back,
}

/// A server-owned record held in one of the store's normalized collections.
pub trait Entity:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Unique within the collection only. Relations between collections are
    /// resolved by lookup at read time.
    type Id: Debug
        + Display
        + Clone
        + Eq
        + Hash
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Payload sent to the server to create a record; the server assigns the
    /// ID and timestamps.
    type Draft: Debug + Clone + Serialize + Send + Sync + 'static;

    /// Collection name, used for REST endpoints and logging.
    const COLLECTION: &'static str;
    const INSERT_POSITION: InsertPosition;

    fn id(&self) -> &Self::Id;
}
