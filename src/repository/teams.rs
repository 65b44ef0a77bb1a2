//! Maintenance teams repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, Team, UpdateTeam},
};

const DUPLICATE_NAME: &str = "Team name already exists";

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all teams
    pub async fn list(&self) -> AppResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, Team>("SELECT * FROM maintenance_teams ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Team>> {
        let row = sqlx::query_as::<_, Team>("SELECT * FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Exact-match lookup by name
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<Team>> {
        let row = sqlx::query_as::<_, Team>("SELECT * FROM maintenance_teams WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        sqlx::query_as::<_, Team>(
            "INSERT INTO maintenance_teams (name, members) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.members)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::unique_violation(e, DUPLICATE_NAME))
    }

    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<Option<Team>> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.name.is_some() { sets.push(format!("name = ${}", idx)); idx += 1; }
        if data.members.is_some() { sets.push(format!("members = ${}", idx)); idx += 1; }

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE maintenance_teams SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Team>(&query);
        if let Some(ref name) = data.name { builder = builder.bind(name); }
        if let Some(ref members) = data.members { builder = builder.bind(members); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::unique_violation(e, DUPLICATE_NAME))
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_teams")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
