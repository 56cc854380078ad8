use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's egg pickup for a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EggCollection {
    pub id: String,
    pub batch_id: String,
    pub date: NaiveDate,
    pub whole_count: u32,
    pub broken_count: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EggCollection {
    /// Whole plus broken eggs picked up in this collection. Widened so the
    /// sum cannot overflow the counters' own type.
    pub fn total_count(&self) -> u64 {
        u64::from(self.whole_count) + u64::from(self.broken_count)
    }
}
