use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use super::entity::{Entity, InsertPosition};

pub type GoalId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub period_months: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub name: String,
    pub icon: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub monthly_contribution: f64,
    pub period_months: u32,
}

impl Goal {
    /// Saved amount as a whole percentage of the target, rounded. A goal with
    /// no target reports 0.
    pub fn progress_percentage(&self) -> u32 {
        if self.target_amount <= 0.0 {
            return 0;
        }
        ((self.saved_amount / self.target_amount) * 100.0)
            .round()
            .max(0.0) as u32
    }
}

impl Entity for Goal {
    type Id = GoalId;
    type Draft = GoalDraft;

    const COLLECTION: &'static str = "goals";
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;

    fn id(&self) -> &GoalId {
        &self.id
    }
}
