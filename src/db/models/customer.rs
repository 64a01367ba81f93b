use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer record keyed by phone number. Upserted at job intake so the
/// customer table always reflects the latest name seen on a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub phone: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
