use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Days, Months, Utc};
use serde_derive::{Deserialize, Serialize};

use super::transaction::TransactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyConfig {
    pub frequency: Frequency,
    #[serde(default)]
    pub last_executed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_execution: Option<DateTime<Utc>>,
}

/// Side-index flagging transactions as recurring. Mutated only through the
/// combined operations in `recurring_index_impl`, which keep every
/// `frequency_config` key inside `recurring_ids`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurringIndex {
    pub(crate) recurring_ids: BTreeSet<TransactionId>,
    pub(crate) frequency_config: BTreeMap<TransactionId, FrequencyConfig>,
}

// --

impl Frequency {
    pub fn next_after(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Frequency::Weekly => from.checked_add_days(Days::new(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
            Frequency::Yearly => from.checked_add_months(Months::new(12)),
        }
    }

    /// Factor that normalizes one occurrence to a monthly amount.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Frequency::Weekly => 4.0,
            Frequency::Monthly => 1.0,
            Frequency::Yearly => 1.0 / 12.0,
        }
    }
}

impl FrequencyConfig {
    pub fn starting(frequency: Frequency, at: DateTime<Utc>) -> Self {
        Self {
            frequency,
            last_executed: Some(at),
            next_execution: frequency.next_after(at),
        }
    }
}

impl RecurringIndex {
    pub fn recurring_ids(&self) -> &BTreeSet<TransactionId> {
        &self.recurring_ids
    }

    pub fn frequency_config(&self) -> &BTreeMap<TransactionId, FrequencyConfig> {
        &self.frequency_config
    }

    pub fn is_recurring(&self, id: TransactionId) -> bool {
        self.recurring_ids.contains(&id)
    }

    pub fn config_for(&self, id: TransactionId) -> Option<&FrequencyConfig> {
        self.frequency_config.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.recurring_ids.is_empty()
    }
}
