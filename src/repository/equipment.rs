//! Equipment repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentChanges, NewEquipment},
};

const DUPLICATE_SERIAL: &str = "Serial number already exists";

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, one page at a time
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY id OFFSET $1 LIMIT $2"
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Exact-match lookup by serial number
    pub async fn get_by_serial(&self, serial_number: &str) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE serial_number = $1")
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, data: &NewEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, serial_number, department, location, purchase_date,
                                   warranty_expiry, maintenance_team_id, is_scrapped)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.department)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(data.warranty_expiry)
        .bind(data.maintenance_team_id)
        .bind(data.is_scrapped)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::unique_violation(e, DUPLICATE_SERIAL))
    }

    pub async fn update(&self, id: i32, changes: &EquipmentChanges) -> AppResult<Option<Equipment>> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

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

        add_field!(changes.name, "name");
        add_field!(changes.serial_number, "serial_number");
        add_field!(changes.department, "department");
        add_field!(changes.location, "location");
        add_field!(changes.purchase_date, "purchase_date");
        add_field!(changes.warranty_expiry, "warranty_expiry");
        add_field!(changes.maintenance_team_id, "maintenance_team_id");
        add_field!(changes.is_scrapped, "is_scrapped");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(changes.name);
        bind_field!(changes.serial_number);
        bind_field!(changes.department);
        bind_field!(changes.location);
        bind_field!(changes.purchase_date);
        bind_field!(changes.warranty_expiry);
        bind_field!(changes.maintenance_team_id);
        bind_field!(changes.is_scrapped);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::unique_violation(e, DUPLICATE_SERIAL))
    }

    /// Delete equipment and its maintenance requests in one transaction
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let requests = sqlx::query("DELETE FROM maintenance_requests WHERE equipment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(
            equipment_id = id,
            requests_deleted = requests.rows_affected(),
            "Equipment deleted with its requests"
        );
        Ok(true)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
