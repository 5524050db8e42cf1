use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use super::{
    entity::{Entity, InsertPosition},
    transaction::TransactionType,
};

pub type CategoryId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color_fill: String,
    #[serde(default)]
    pub color_bg: String,
    #[serde(default)]
    pub transaction_type: TransactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub color_fill: String,
    pub color_bg: String,
    pub transaction_type: TransactionType,
}

impl Entity for Category {
    type Id = CategoryId;
    type Draft = CategoryDraft;

    const COLLECTION: &'static str = "categories";
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}
