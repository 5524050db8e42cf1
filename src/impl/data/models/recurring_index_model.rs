use std::collections::BTreeMap;

use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};

use crate::{
    entities::{FrequencyConfig, RecurringIndex, TransactionId},
    errors::InvalidPersistedPayload,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecurringIndexModel {
    pub recurring_ids: Vec<TransactionId>,
    pub frequency_config: BTreeMap<TransactionId, FrequencyConfig>,
}

impl From<&RecurringIndex> for RecurringIndexModel {
    fn from(index: &RecurringIndex) -> Self {
        Self {
            recurring_ids: index.recurring_ids.iter().copied().collect(),
            frequency_config: index.frequency_config.clone(),
        }
    }
}

impl TryFrom<RecurringIndexModel> for RecurringIndex {
    type Error = ServerError;

    fn try_from(model: RecurringIndexModel) -> Result<Self, Self::Error> {
        let index = RecurringIndex {
            recurring_ids: model.recurring_ids.into_iter().collect(),
            frequency_config: model.frequency_config,
        };
        if !index.is_consistent() {
            return Err(InvalidPersistedPayload::new(
                "recurring",
                "frequencyConfig has IDs missing from recurringIds",
            ));
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn orphan_config_is_rejected() {
        let model: RecurringIndexModel = serde_json::from_value(json!({
            "recurringIds": [1],
            "frequencyConfig": { "2": { "frequency": "weekly" } }
        }))
        .unwrap();
        assert!(RecurringIndex::try_from(model).is_err());
    }

    #[test]
    fn consistent_payload_decodes() {
        let model: RecurringIndexModel = serde_json::from_value(json!({
            "recurringIds": [42, 7],
            "frequencyConfig": { "42": { "frequency": "yearly" } }
        }))
        .unwrap();
        let index = RecurringIndex::try_from(model).unwrap();
        assert!(index.is_recurring(7));
        assert_eq!(
            index.config_for(42).map(|c| c.frequency),
            Some(crate::entities::Frequency::Yearly)
        );
    }
}
