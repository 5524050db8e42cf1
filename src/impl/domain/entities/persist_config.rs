use std::time::Duration;

use serde_derive::{Deserialize, Serialize};

/// Top-level slices addressable by the persistence configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceKey {
    Auth,
    Theme,
    Transactions,
    Categories,
    Accounts,
    Goals,
    Recurring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    pub key_prefix: String,
    pub whitelist: Vec<SliceKey>,
    pub blacklist: Vec<SliceKey>,
    pub debounce_ms: u64,
}

// --

impl SliceKey {
    pub const ALL: [SliceKey; 7] = [
        SliceKey::Auth,
        SliceKey::Theme,
        SliceKey::Transactions,
        SliceKey::Categories,
        SliceKey::Accounts,
        SliceKey::Goals,
        SliceKey::Recurring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKey::Auth => "auth",
            SliceKey::Theme => "theme",
            SliceKey::Transactions => "transactions",
            SliceKey::Categories => "categories",
            SliceKey::Accounts => "accounts",
            SliceKey::Goals => "goals",
            SliceKey::Recurring => "recurring",
        }
    }

    /// Slices that migrate on their own schedule get a dedicated envelope
    /// instead of a field in the root envelope.
    pub fn has_own_envelope(&self) -> bool {
        matches!(self, SliceKey::Auth | SliceKey::Recurring)
    }
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            key_prefix: "persist".to_string(),
            whitelist: SliceKey::ALL.to_vec(),
            blacklist: Vec::new(),
            debounce_ms: 250,
        }
    }
}

impl PersistConfig {
    pub fn persists(&self, slice: SliceKey) -> bool {
        self.whitelist.contains(&slice) && !self.blacklist.contains(&slice)
    }

    /// Whitelisted slices stored inside the combined root envelope.
    pub fn root_slices(&self) -> Vec<SliceKey> {
        SliceKey::ALL
            .into_iter()
            .filter(|s| !s.has_own_envelope() && self.persists(*s))
            .collect()
    }

    pub fn root_key(&self) -> String {
        format!("{}:root", self.key_prefix)
    }

    pub fn slice_key(&self, slice: SliceKey) -> String {
        format!("{}:{}", self.key_prefix, slice.as_str())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
