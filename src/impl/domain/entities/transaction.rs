use chrono::{DateTime, NaiveDate, Utc};
use serde_derive::{Deserialize, Serialize};

use super::{
    account::AccountId,
    category::CategoryId,
    entity::{Entity, InsertPosition},
};

pub type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    #[serde(default)]
    pub user_id: String,
    pub category_id: CategoryId,
    pub amount: f64,
    #[serde(default)]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    pub category_id: CategoryId,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: String,
    /// Server defaults to the current day when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

// --

impl TransactionDraft {
    pub fn expense(category_id: CategoryId, amount: f64, description: impl Into<String>) -> Self {
        Self {
            account_id: None,
            category_id,
            amount,
            transaction_type: TransactionType::Expense,
            description: description.into(),
            date: None,
        }
    }

    pub fn income(category_id: CategoryId, amount: f64, description: impl Into<String>) -> Self {
        Self {
            transaction_type: TransactionType::Income,
            ..Self::expense(category_id, amount, description)
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn from_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }
}

impl Entity for Transaction {
    type Id = TransactionId;
    type Draft = TransactionDraft;

    const COLLECTION: &'static str = "transactions";
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;

    fn id(&self) -> &TransactionId {
        &self.id
    }
}
