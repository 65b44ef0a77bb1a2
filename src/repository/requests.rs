//! Maintenance requests repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::request::{MaintenanceRequest, NewRequest, RequestChanges, RequestQuery},
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List requests, optionally filtered by equipment and status
    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT * FROM maintenance_requests {} ORDER BY id", where_clause);

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&sql);
        if let Some(equipment_id) = query.equipment_id { builder = builder.bind(equipment_id); }
        if let Some(status) = query.status { builder = builder.bind(status); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<MaintenanceRequest>> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(&self, data: &NewRequest) -> AppResult<MaintenanceRequest> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (title, description, equipment_id, team_id, technician,
                                              request_type, status, scheduled_date, duration)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.equipment_id)
        .bind(data.team_id)
        .bind(&data.technician)
        .bind(data.request_type)
        .bind(data.status)
        .bind(data.scheduled_date)
        .bind(data.duration)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Apply changes to a request. When `scrap_equipment` is set, the equipment
    /// is flagged as scrapped in the same transaction; a missing equipment row
    /// is not an error.
    pub async fn update(
        &self,
        id: i32,
        changes: &RequestChanges,
        scrap_equipment: Option<i32>,
    ) -> AppResult<Option<MaintenanceRequest>> {
        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(changes.title, "title");
        add_field!(changes.description, "description");
        add_field!(changes.technician, "technician");
        add_field!(changes.request_type, "request_type");
        add_field!(changes.status, "status");
        add_field!(changes.scheduled_date, "scheduled_date");
        add_field!(changes.duration, "duration");

        let mut tx = self.pool.begin().await?;

        let updated = if sets.is_empty() {
            sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            let query = format!(
                "UPDATE maintenance_requests SET {} WHERE id = ${} RETURNING *",
                sets.join(", "),
                idx
            );

            let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query);

            macro_rules! bind_field {
                ($field:expr) => {
                    if let Some(ref val) = $field {
                        builder = builder.bind(val);
                    }
                };
            }

            bind_field!(changes.title);
            bind_field!(changes.description);
            bind_field!(changes.technician);
            bind_field!(changes.request_type);
            bind_field!(changes.status);
            bind_field!(changes.scheduled_date);
            bind_field!(changes.duration);

            builder.bind(id).fetch_optional(&mut *tx).await?
        };

        let Some(request) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(equipment_id) = scrap_equipment {
            let result = sqlx::query("UPDATE equipment SET is_scrapped = TRUE WHERE id = $1")
                .bind(equipment_id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                tracing::warn!(
                    request_id = id,
                    equipment_id,
                    "Scrap cascade skipped: equipment no longer exists"
                );
            }
        }

        tx.commit().await?;
        Ok(Some(request))
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of requests referencing a piece of equipment
    pub async fn count_for_equipment(&self, equipment_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_requests WHERE equipment_id = $1"
        )
        .bind(equipment_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
