use fractic_server_error::ServerError;
use serde_json::{json, Map, Value};

use crate::{domain::logic::migration::MigrationChain, errors::InvalidPersistedPayload};

pub(crate) const ROOT_VERSION: u32 = 1;
pub(crate) const AUTH_VERSION: u32 = 1;
pub(crate) const RECURRING_VERSION: u32 = 1;

pub(crate) fn root_chain() -> MigrationChain {
    MigrationChain::new("root", ROOT_VERSION).step(0, root_v0_to_v1)
}

pub(crate) fn auth_chain() -> MigrationChain {
    MigrationChain::new("auth", AUTH_VERSION).step(0, auth_v0_to_v1)
}

pub(crate) fn recurring_chain() -> MigrationChain {
    MigrationChain::new("recurring", RECURRING_VERSION).step(0, recurring_v0_to_v1)
}

// --

/// Unversioned builds wrote each slice as its own JSON string next to a
/// `_persist` bookkeeping entry. The string-encoded slices are decoded in
/// place; entries that are not valid JSON are kept so that only that slice
/// falls back to its default.
fn decode_string_entries(entries: &mut Map<String, Value>) {
    for value in entries.values_mut() {
        if let Value::String(text) = value {
            if let Ok(decoded) = serde_json::from_str(text) {
                *value = decoded;
            }
        }
    }
    entries.remove("_persist");
}

/// Unversioned builds also cached locally seeded transactions and categories
/// with string IDs. Those cannot be reconciled with server records; they are
/// dropped and refetched. The old `lifestyle` list has no link to
/// transaction IDs and the nested `auth` copy is superseded by its own key.
fn root_v0_to_v1(payload: Value) -> Result<Value, ServerError> {
    let Value::Object(mut slices) = payload else {
        return Err(InvalidPersistedPayload::new("root", "expected an object"));
    };
    decode_string_entries(&mut slices);
    for dropped in ["transactions", "categories", "counter", "lifestyle", "auth"] {
        slices.remove(dropped);
    }
    Ok(Value::Object(slices))
}

/// Strips a token persisted before it moved to secure storage.
fn auth_v0_to_v1(payload: Value) -> Result<Value, ServerError> {
    let Value::Object(mut session) = payload else {
        return Err(InvalidPersistedPayload::new("auth", "expected an object"));
    };
    decode_string_entries(&mut session);
    session.remove("token");
    Ok(Value::Object(session))
}

/// Any unversioned payload under this key predates the ID-keyed index and
/// holds free-standing expense objects, so nothing carries over.
fn recurring_v0_to_v1(_payload: Value) -> Result<Value, ServerError> {
    Ok(json!({ "recurringIds": [], "frequencyConfig": {} }))
}
