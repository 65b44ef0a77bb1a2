//! Repository layer for database operations

pub mod equipment;
pub mod requests;
pub mod teams;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        equipment::{Equipment, EquipmentChanges, NewEquipment},
        request::{MaintenanceRequest, NewRequest, RequestChanges, RequestQuery},
        team::{CreateTeam, Team, UpdateTeam},
    },
};

/// Storage operations the maintenance services rely on.
///
/// `find_*` return `None` for unknown ids; `update_*` and `delete_*` report a
/// missing row the same way, leaving the choice of error to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;

    async fn list_teams(&self) -> AppResult<Vec<Team>>;
    async fn find_team(&self, id: i32) -> AppResult<Option<Team>>;
    async fn find_team_by_name(&self, name: &str) -> AppResult<Option<Team>>;
    async fn insert_team(&self, data: &CreateTeam) -> AppResult<Team>;
    async fn update_team(&self, id: i32, data: &UpdateTeam) -> AppResult<Option<Team>>;
    async fn delete_team(&self, id: i32) -> AppResult<bool>;
    async fn count_teams(&self) -> AppResult<i64>;

    async fn list_equipment(&self, skip: i64, limit: i64) -> AppResult<Vec<Equipment>>;
    async fn find_equipment(&self, id: i32) -> AppResult<Option<Equipment>>;
    async fn find_equipment_by_serial(&self, serial_number: &str) -> AppResult<Option<Equipment>>;
    async fn insert_equipment(&self, data: &NewEquipment) -> AppResult<Equipment>;
    async fn update_equipment(&self, id: i32, changes: &EquipmentChanges) -> AppResult<Option<Equipment>>;
    /// Delete the equipment together with every request filed against it
    async fn delete_equipment(&self, id: i32) -> AppResult<bool>;
    async fn count_equipment(&self) -> AppResult<i64>;

    async fn list_requests(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>>;
    async fn find_request(&self, id: i32) -> AppResult<Option<MaintenanceRequest>>;
    async fn insert_request(&self, data: &NewRequest) -> AppResult<MaintenanceRequest>;
    /// Apply `changes` and, in the same transaction, flag `scrap_equipment`
    /// (if given and still present) as scrapped
    async fn update_request(
        &self,
        id: i32,
        changes: &RequestChanges,
        scrap_equipment: Option<i32>,
    ) -> AppResult<Option<MaintenanceRequest>>;
    async fn delete_request(&self, id: i32) -> AppResult<bool>;
    async fn count_requests_for_equipment(&self, equipment_id: i32) -> AppResult<i64>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub teams: teams::TeamsRepository,
    pub equipment: equipment::EquipmentRepository,
    pub requests: requests::RequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            teams: teams::TeamsRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl MaintenanceStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_teams(&self) -> AppResult<Vec<Team>> {
        self.teams.list().await
    }

    async fn find_team(&self, id: i32) -> AppResult<Option<Team>> {
        self.teams.get_by_id(id).await
    }

    async fn find_team_by_name(&self, name: &str) -> AppResult<Option<Team>> {
        self.teams.get_by_name(name).await
    }

    async fn insert_team(&self, data: &CreateTeam) -> AppResult<Team> {
        self.teams.create(data).await
    }

    async fn update_team(&self, id: i32, data: &UpdateTeam) -> AppResult<Option<Team>> {
        self.teams.update(id, data).await
    }

    async fn delete_team(&self, id: i32) -> AppResult<bool> {
        self.teams.delete(id).await
    }

    async fn count_teams(&self) -> AppResult<i64> {
        self.teams.count().await
    }

    async fn list_equipment(&self, skip: i64, limit: i64) -> AppResult<Vec<Equipment>> {
        self.equipment.list(skip, limit).await
    }

    async fn find_equipment(&self, id: i32) -> AppResult<Option<Equipment>> {
        self.equipment.get_by_id(id).await
    }

    async fn find_equipment_by_serial(&self, serial_number: &str) -> AppResult<Option<Equipment>> {
        self.equipment.get_by_serial(serial_number).await
    }

    async fn insert_equipment(&self, data: &NewEquipment) -> AppResult<Equipment> {
        self.equipment.create(data).await
    }

    async fn update_equipment(&self, id: i32, changes: &EquipmentChanges) -> AppResult<Option<Equipment>> {
        self.equipment.update(id, changes).await
    }

    async fn delete_equipment(&self, id: i32) -> AppResult<bool> {
        self.equipment.delete(id).await
    }

    async fn count_equipment(&self) -> AppResult<i64> {
        self.equipment.count().await
    }

    async fn list_requests(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>> {
        self.requests.list(query).await
    }

    async fn find_request(&self, id: i32) -> AppResult<Option<MaintenanceRequest>> {
        self.requests.get_by_id(id).await
    }

    async fn insert_request(&self, data: &NewRequest) -> AppResult<MaintenanceRequest> {
        self.requests.create(data).await
    }

    async fn update_request(
        &self,
        id: i32,
        changes: &RequestChanges,
        scrap_equipment: Option<i32>,
    ) -> AppResult<Option<MaintenanceRequest>> {
        self.requests.update(id, changes, scrap_equipment).await
    }

    async fn delete_request(&self, id: i32) -> AppResult<bool> {
        self.requests.delete(id).await
    }

    async fn count_requests_for_equipment(&self, equipment_id: i32) -> AppResult<i64> {
        self.requests.count_for_equipment(equipment_id).await
    }
}
