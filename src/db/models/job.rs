//! Job (service order) data models.
//!
//! A job is one service order for a customer's vehicle. `fault_category`
//! holds a comma-separated list of fault labels as entered at intake; the
//! intelligence module splits and trims it, the store treats it as opaque.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum JobStatus {
    Received,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Received => "Received",
            JobStatus::InProgress => "InProgress",
            JobStatus::Completed => "Completed",
            JobStatus::Delivered => "Delivered",
            JobStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub customer_phone: String,
    pub customer_name: String,
    pub vehicle: Option<String>,
    pub fault_category: Option<String>,
    pub problem_description: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lighter job view for list surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub id: String,
    pub customer_phone: String,
    pub customer_name: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Job> for JobInfo {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            customer_phone: job.customer_phone,
            customer_name: job.customer_name,
            status: job.status,
            created_at: job.created_at,
        }
    }
}
