use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{InvalidEnvelope, StorageWriteError};

/// Stored form of one persisted key: the schema version plus its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EnvelopeModel {
    pub version: u32,
    pub payload: Value,
}

impl EnvelopeModel {
    pub(crate) fn new(version: u32, payload: Value) -> Self {
        Self { version, payload }
    }

    /// Returns the persisted version and payload. Builds that predate
    /// versioning stored the bare payload, which reads back as version `None`.
    pub(crate) fn parse(key: &str, text: &str) -> Result<(Option<u32>, Value), ServerError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| InvalidEnvelope::with_debug(key, &e))?;
        let is_envelope = value
            .as_object()
            .is_some_and(|o| o.len() == 2 && o.contains_key("version") && o.contains_key("payload"));
        if !is_envelope {
            return Ok((None, value));
        }
        let envelope: EnvelopeModel =
            serde_json::from_value(value).map_err(|e| InvalidEnvelope::with_debug(key, &e))?;
        Ok((Some(envelope.version), envelope.payload))
    }

    pub(crate) fn to_text(&self, key: &str) -> Result<String, ServerError> {
        serde_json::to_string(self).map_err(|e| StorageWriteError::with_debug(key, &e))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn versioned_envelope_is_unwrapped() {
        let text = EnvelopeModel::new(1, json!({ "recurringIds": [42] }))
            .to_text("persist:recurring")
            .unwrap();
        let (version, payload) = EnvelopeModel::parse("persist:recurring", &text).unwrap();
        assert_eq!(version, Some(1));
        assert_eq!(payload, json!({ "recurringIds": [42] }));
    }

    #[test]
    fn bare_payload_reads_as_unversioned() {
        let (version, payload) =
            EnvelopeModel::parse("persist:recurring", r#"{"expenses":[]}"#).unwrap();
        assert_eq!(version, None);
        assert_eq!(payload, json!({ "expenses": [] }));

        let (version, _) = EnvelopeModel::parse("persist:recurring", "[]").unwrap();
        assert_eq!(version, None);
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(EnvelopeModel::parse("persist:root", "{not json").is_err());
        assert!(EnvelopeModel::parse("persist:root", r#"{"version":"x","payload":{}}"#).is_err());
    }
}
