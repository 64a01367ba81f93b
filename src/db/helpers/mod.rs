use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::JobStatus;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_job_status(value: &str) -> Result<JobStatus> {
    match value {
        "Received" => Ok(JobStatus::Received),
        "InProgress" => Ok(JobStatus::InProgress),
        "Completed" => Ok(JobStatus::Completed),
        "Delivered" => Ok(JobStatus::Delivered),
        "Cancelled" => Ok(JobStatus::Cancelled),
        other => Err(anyhow!("unknown job status {other}")),
    }
}
