use chrono::{DateTime, Utc};

use crate::entities::{Frequency, FrequencyConfig, RecurringAction, RecurringIndex, TransactionId};

impl RecurringIndex {
    pub(crate) fn reduce(&mut self, action: RecurringAction) -> bool {
        match action {
            RecurringAction::Mark { id, frequency, at } => self.mark(id, frequency, at),
            RecurringAction::UpdateFrequency { id, frequency } => {
                self.update_frequency(id, frequency)
            }
            RecurringAction::Unmark(id) => self.unmark(id),
            RecurringAction::ClearAll => self.clear_all(),
        }
    }

    /// Idempotent for identical arguments.
    fn mark(&mut self, id: TransactionId, frequency: Frequency, at: DateTime<Utc>) -> bool {
        let config = FrequencyConfig::starting(frequency, at);
        let inserted = self.recurring_ids.insert(id);
        let previous = self.frequency_config.insert(id, config.clone());
        inserted || previous.as_ref() != Some(&config)
    }

    fn update_frequency(&mut self, id: TransactionId, frequency: Frequency) -> bool {
        match self.frequency_config.get_mut(&id) {
            Some(config) if config.frequency != frequency => {
                config.frequency = frequency;
                config.next_execution = config.last_executed.and_then(|t| frequency.next_after(t));
                true
            }
            Some(_) => false,
            None if self.recurring_ids.contains(&id) => {
                self.frequency_config.insert(
                    id,
                    FrequencyConfig {
                        frequency,
                        last_executed: None,
                        next_execution: None,
                    },
                );
                true
            }
            None => false,
        }
    }

    /// Removes the ID from both structures in one step.
    fn unmark(&mut self, id: TransactionId) -> bool {
        let removed_id = self.recurring_ids.remove(&id);
        let removed_config = self.frequency_config.remove(&id).is_some();
        removed_id || removed_config
    }

    fn clear_all(&mut self) -> bool {
        let changed = !self.recurring_ids.is_empty() || !self.frequency_config.is_empty();
        self.recurring_ids.clear();
        self.frequency_config.clear();
        changed
    }

    /// Every configured ID is also flagged recurring.
    pub fn is_consistent(&self) -> bool {
        self.frequency_config
            .keys()
            .all(|id| self.recurring_ids.contains(id))
    }
}
