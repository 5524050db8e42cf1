use chrono::{DateTime, Utc};
use iso_currency::Currency;
use serde_derive::{Deserialize, Serialize};

use super::entity::{Entity, InsertPosition};

pub type AccountId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "isActivated", default = "activated")]
    pub is_activated: bool,
    pub balance: f64,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub bank_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountDraft {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "isActivated")]
    pub is_activated: bool,
    pub balance: f64,
    pub currency: Currency,
    pub account_type: String,
    pub bank_name: String,
}

/// Currency as the server reports it. Codes outside ISO 4217 are kept
/// verbatim instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyCode {
    Known(Currency),
    Other(String),
}

// --

impl CurrencyCode {
    pub fn currency(&self) -> Option<Currency> {
        match self {
            Self::Known(currency) => Some(*currency),
            Self::Other(_) => None,
        }
    }

    pub fn code(&self) -> String {
        match self {
            Self::Known(currency) => currency.code().to_string(),
            Self::Other(code) => code.clone(),
        }
    }
}

impl From<Currency> for CurrencyCode {
    fn from(currency: Currency) -> Self {
        Self::Known(currency)
    }
}

fn activated() -> bool {
    true
}

impl Entity for Account {
    type Id = AccountId;
    type Draft = AccountDraft;

    const COLLECTION: &'static str = "accounts";
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn id(&self) -> &AccountId {
        &self.id
    }
}
