//! Maintenance teams service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, Team, UpdateTeam},
    repository::MaintenanceStore,
    rules,
};

const DUPLICATE_NAME: &str = "Team name already exists";

#[derive(Clone)]
pub struct TeamsService {
    store: Arc<dyn MaintenanceStore>,
}

impl TeamsService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Team>> {
        self.store.list_teams().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Team> {
        self.store
            .find_team(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    /// Create a team; names are unique (exact match)
    pub async fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        data.validate()?;

        let holder = self.store.find_team_by_name(&data.name).await?;
        rules::ensure_unique(holder.map(|t| t.id), None, DUPLICATE_NAME)?;

        let team = self.store.insert_team(data).await?;
        tracing::info!(team_id = team.id, name = %team.name, "Team created");
        Ok(team)
    }

    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<Team> {
        data.validate()?;
        self.get_by_id(id).await?;

        if let Some(ref name) = data.name {
            let holder = self.store.find_team_by_name(name).await?;
            rules::ensure_unique(holder.map(|t| t.id), Some(id), DUPLICATE_NAME)?;
        }

        let team = self
            .store
            .update_team(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;
        tracing::info!(team_id = id, "Team updated");
        Ok(team)
    }

    /// Delete a team. Equipment and requests referencing it are kept.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete_team(id).await? {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        tracing::info!(team_id = id, "Team deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockMaintenanceStore;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn team(id: i32, name: &str) -> Team {
        Team { id, name: name.to_string(), members: "Emma Davis, Frank Miller".to_string() }
    }

    fn service(store: MockMaintenanceStore) -> TeamsService {
        TeamsService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_find_team_by_name()
            .withf(|name| name == "HVAC Team")
            .returning(|_| Ok(Some(team(3, "HVAC Team"))));
        store.expect_insert_team().never();

        let data = CreateTeam { name: "HVAC Team".into(), members: String::new() };
        let err = service(store).create(&data).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_is_case_sensitive() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_team_by_name().returning(|_| Ok(None));
        store
            .expect_insert_team()
            .times(1)
            .returning(|data| Ok(team(4, &data.name)));

        let data = CreateTeam { name: "hvac team".into(), members: String::new() };
        let created = assert_ok!(service(store).create(&data).await);
        assert_eq!(created.name, "hvac team");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_team_by_name().never();
        store.expect_insert_team().never();

        let data = CreateTeam { name: String::new(), members: "Alice".into() };
        let err = service(store).create(&data).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_may_keep_its_own_name() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_find_team()
            .with(eq(3))
            .returning(|id| Ok(Some(team(id, "HVAC Team"))));
        store
            .expect_find_team_by_name()
            .returning(|_| Ok(Some(team(3, "HVAC Team"))));
        store
            .expect_update_team()
            .times(1)
            .returning(|id, _| Ok(Some(team(id, "HVAC Team"))));

        let data = UpdateTeam { name: Some("HVAC Team".into()), members: Some("Grace".into()) };
        assert_ok!(service(store).update(3, &data).await);
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_other_team() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_team().returning(|id| Ok(Some(team(id, "Mechanical Team"))));
        store
            .expect_find_team_by_name()
            .returning(|_| Ok(Some(team(1, "Electrical Team"))));
        store.expect_update_team().never();

        let data = UpdateTeam { name: Some("Electrical Team".into()), members: None };
        let err = service(store).update(2, &data).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_and_delete_unknown_team() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_team().returning(|_| Ok(None));
        store.expect_delete_team().returning(|_| Ok(false));

        let svc = service(store);
        assert!(matches!(svc.get_by_id(9).await, Err(AppError::NotFound(_))));
        assert_err!(svc.delete(9).await);
    }
}
