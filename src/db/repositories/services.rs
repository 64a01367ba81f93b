use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::ServiceItem};

const SERVICE_COLUMNS: &str =
    "id, name, description, price_cents, duration_mins, active, created_at, updated_at";

fn row_to_service(row: &Row) -> Result<ServiceItem> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    let active: i64 = row.get("active")?;

    Ok(ServiceItem {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price_cents: row.get("price_cents")?,
        duration_mins: row.get("duration_mins")?,
        active: active != 0,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_service(&self, service: &ServiceItem) -> Result<()> {
        let record = service.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO services (id, name, description, price_cents, duration_mins,
                                       active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.name,
                    record.description,
                    record.price_cents,
                    record.duration_mins,
                    record.active as i64,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn list_services(&self, active_only: bool) -> Result<Vec<ServiceItem>> {
        self.execute(move |conn| {
            let sql = if active_only {
                format!(
                    "SELECT {SERVICE_COLUMNS} FROM services WHERE active = 1 ORDER BY name ASC"
                )
            } else {
                format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY name ASC")
            };
            let mut stmt = conn.prepare(&sql)?;

            let mut rows = stmt.query([])?;
            let mut services = Vec::new();
            while let Some(row) = rows.next()? {
                services.push(row_to_service(row)?);
            }

            Ok(services)
        })
        .await
    }

    pub async fn update_service_price(
        &self,
        service_id: &str,
        price_cents: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let service_id = service_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE services
                 SET price_cents = ?1,
                     updated_at = ?2
                 WHERE id = ?3",
                params![price_cents, updated_at.to_rfc3339(), service_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow::anyhow!("Service not found"));
            }

            Ok(())
        })
        .await
    }

    pub async fn set_service_active(
        &self,
        service_id: &str,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let service_id = service_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE services
                 SET active = ?1,
                     updated_at = ?2
                 WHERE id = ?3",
                params![active as i64, updated_at.to_rfc3339(), service_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow::anyhow!("Service not found"));
            }

            Ok(())
        })
        .await
    }
}
