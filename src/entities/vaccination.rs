use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A vaccine on the farm's schedule, re-administered every
/// `interval_days`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: String,
    pub name: String,
    pub interval_days: u32,
}

/// An administered dose and when the next one falls due.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    pub id: String,
    pub batch_id: String,
    pub vaccine_id: String,
    pub date: NaiveDate,
    pub next_scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}
