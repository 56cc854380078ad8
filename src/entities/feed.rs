use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A feed formulation (e.g. layers mash, chick starter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedType {
    pub id: String,
    pub name: String,
    pub bird_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Feed issued to a batch on a given day. `batch_id` is optional because
/// general-purpose feed can be drawn without attributing it to one flock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConsumption {
    pub id: String,
    pub feed_type_id: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    pub date: NaiveDate,
    pub quantity_kg: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Feed received into the store on a given day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedInventory {
    pub id: String,
    pub feed_type_id: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    pub date: NaiveDate,
    pub quantity_kg: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}
