use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry for a service the garage offers. Prices are stored in
/// cents to keep SQLite arithmetic exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_mins: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
