use serde::{Deserialize, Serialize};

/// A repeat buyer tracked by the sales and order books.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub contact_number: String,
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
}
