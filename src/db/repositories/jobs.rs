use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_job_status},
    models::{Job, JobStatus},
};

const JOB_COLUMNS: &str = "id, customer_phone, customer_name, vehicle, fault_category, \
                           problem_description, status, created_at, updated_at";

fn row_to_job(row: &Row) -> Result<Job> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    let status: String = row.get("status")?;

    Ok(Job {
        id: row.get("id")?,
        customer_phone: row.get("customer_phone")?,
        customer_name: row.get("customer_name")?,
        vehicle: row.get("vehicle")?,
        fault_category: row.get("fault_category")?,
        problem_description: row.get("problem_description")?,
        status: parse_job_status(&status)?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_job(&self, job: &Job) -> Result<()> {
        let record = job.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO jobs (id, customer_phone, customer_name, vehicle, fault_category,
                                   problem_description, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id,
                    record.customer_phone,
                    record.customer_name,
                    record.vehicle,
                    record.fault_category,
                    record.problem_description,
                    record.status.as_str(),
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_job(&self, job_id: &str) -> Result<Option<Job>> {
        let job_id = job_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![job_id])?;
            let job = match rows.next()? {
                Some(row) => Some(row_to_job(row)?),
                None => None,
            };
            Ok(job)
        })
        .await
    }

    pub async fn update_job_status(
        &self,
        job_id: &str,
        status: JobStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let job_id = job_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE jobs
                 SET status = ?1,
                     updated_at = ?2
                 WHERE id = ?3",
                params![status.as_str(), updated_at.to_rfc3339(), job_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow::anyhow!("Job not found"));
            }

            Ok(())
        })
        .await
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut jobs = Vec::new();
            while let Some(row) = rows.next()? {
                jobs.push(row_to_job(row)?);
            }

            Ok(jobs)
        })
        .await
    }

    /// All jobs for one customer, newest first — the analyzer's input shape.
    pub async fn list_jobs_for_customer(&self, customer_phone: &str) -> Result<Vec<Job>> {
        let customer_phone = customer_phone.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOB_COLUMNS} FROM jobs
                 WHERE customer_phone = ?1
                 ORDER BY created_at DESC"
            ))?;

            let mut rows = stmt.query(params![customer_phone])?;
            let mut jobs = Vec::new();
            while let Some(row) = rows.next()? {
                jobs.push(row_to_job(row)?);
            }

            Ok(jobs)
        })
        .await
    }

    pub async fn delete_job(&self, job_id: &str) -> Result<()> {
        let job_id = job_id.to_string();
        self.execute(move |conn| {
            // Deleting an already-gone job is not an error.
            conn.execute("DELETE FROM jobs WHERE id = ?1", params![job_id])?;
            Ok(())
        })
        .await
    }
}
