use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::Customer};

fn row_to_customer(row: &Row) -> Result<Customer> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Customer {
        phone: row.get("phone")?,
        name: row.get("name")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    /// Insert the customer or, if the phone is already known, refresh the
    /// name and updated_at. Called from job intake.
    pub async fn upsert_customer(
        &self,
        phone: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let phone = phone.to_string();
        let name = name.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO customers (phone, name, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT(phone) DO UPDATE SET
                     name = excluded.name,
                     updated_at = excluded.updated_at",
                params![phone, name, now.to_rfc3339()],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_customer(&self, phone: &str) -> Result<Option<Customer>> {
        let phone = phone.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT phone, name, created_at, updated_at
                 FROM customers
                 WHERE phone = ?1",
            )?;

            let mut rows = stmt.query(params![phone])?;
            let customer = match rows.next()? {
                Some(row) => Some(row_to_customer(row)?),
                None => None,
            };
            Ok(customer)
        })
        .await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT phone, name, created_at, updated_at
                 FROM customers
                 ORDER BY name ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut customers = Vec::new();
            while let Some(row) = rows.next()? {
                customers.push(row_to_customer(row)?);
            }

            Ok(customers)
        })
        .await
    }
}
