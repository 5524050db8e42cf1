use std::collections::BTreeMap;

use fractic_server_error::ServerError;
use serde_json::Value;
use tracing::debug;

use crate::errors::{MissingMigrationStep, PersistedVersionAhead};

/// One forward step: transforms a payload at version `v` into version `v + 1`.
/// Steps are pure; a step that cannot produce a valid payload returns an
/// error and the caller falls back to the slice's defaults.
pub(crate) type MigrationStep = fn(Value) -> Result<Value, ServerError>;

/// Ordered, version-indexed chain of migrations for one persisted envelope.
pub(crate) struct MigrationChain {
    name: &'static str,
    current_version: u32,
    steps: BTreeMap<u32, MigrationStep>,
}

impl MigrationChain {
    pub(crate) fn new(name: &'static str, current_version: u32) -> Self {
        Self {
            name,
            current_version,
            steps: BTreeMap::new(),
        }
    }

    /// Registers the step that upgrades `from` to `from + 1`.
    pub(crate) fn step(mut self, from: u32, step: MigrationStep) -> Self {
        self.steps.insert(from, step);
        self
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn current_version(&self) -> u32 {
        self.current_version
    }

    /// The chain must cover every version in `[0, current)`.
    pub(crate) fn validate(&self) -> Result<(), ServerError> {
        match (0..self.current_version).find(|v| !self.steps.contains_key(v)) {
            Some(from) => Err(MissingMigrationStep::new(self.name, from, from + 1)),
            None => Ok(()),
        }
    }

    /// Brings a persisted payload up to the current version. A missing version
    /// is treated as 0 (pre-versioning data). A version newer than the code
    /// supports is an error.
    pub(crate) fn migrate(
        &self,
        persisted_version: Option<u32>,
        payload: Value,
    ) -> Result<(u32, Value), ServerError> {
        let from = persisted_version.unwrap_or(0);
        if from > self.current_version {
            return Err(PersistedVersionAhead::new(
                self.name,
                from,
                self.current_version,
            ));
        }
        let mut payload = payload;
        for version in from..self.current_version {
            let step = self
                .steps
                .get(&version)
                .ok_or_else(|| MissingMigrationStep::new(self.name, version, version + 1))?;
            debug!(chain = self.name, from = version, "Applying migration step.");
            payload = step(payload)?;
        }
        Ok((self.current_version, payload))
    }
}
