use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flock of birds managed as one unit.
///
/// `status` is free text curated by the host UI ("Laying", "Brooding",
/// "Sold", ...); reports carry it through verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub name: String,
    pub bird_count: u32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_json() {
        let batch: Batch = serde_json::from_str(
            r#"{
                "id": "1",
                "name": "Batch A",
                "birdCount": 500,
                "status": "Laying",
                "createdAt": "2023-10-01T08:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(batch.name, "Batch A");
        assert_eq!(batch.bird_count, 500);
        assert_eq!(batch.notes, None);
    }
}
