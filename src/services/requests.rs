//! Maintenance requests service

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::request::{
        CreateRequest, MaintenanceRequest, NewRequest, RequestChanges, RequestQuery, RequestView,
        UpdateRequest,
    },
    repository::MaintenanceStore,
    rules,
};

#[derive(Clone)]
pub struct RequestsService {
    store: Arc<dyn MaintenanceStore>,
}

impl RequestsService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &RequestQuery, today: NaiveDate) -> AppResult<Vec<RequestView>> {
        let requests = self.store.list_requests(query).await?;
        Ok(requests.into_iter().map(|r| RequestView::new(r, today)).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        self.store
            .find_request(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    pub async fn get_view(&self, id: i32, today: NaiveDate) -> AppResult<RequestView> {
        Ok(RequestView::new(self.get_by_id(id).await?, today))
    }

    /// Open a request against a piece of equipment.
    /// The team is copied from the equipment at this moment and never re-synced.
    pub async fn create(&self, data: &CreateRequest, today: NaiveDate) -> AppResult<RequestView> {
        data.validate()?;

        let equipment = self
            .store
            .find_equipment(data.equipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", data.equipment_id)))?;

        let new = NewRequest::new(data, equipment.maintenance_team_id);
        let request = self.store.insert_request(&new).await?;
        tracing::info!(
            request_id = request.id,
            equipment_id = request.equipment_id,
            team_id = request.team_id,
            "Maintenance request created"
        );
        Ok(RequestView::new(request, today))
    }

    /// Apply a partial update. Setting the status to Scrap also scraps the
    /// equipment, atomically with the request change.
    pub async fn update(&self, id: i32, data: &UpdateRequest, today: NaiveDate) -> AppResult<RequestView> {
        data.validate()?;
        let current = self.get_by_id(id).await?;
        let changes = RequestChanges::from(data);
        let scrap_equipment = rules::scrap_cascade_target(&current, &changes);

        let request = self
            .store
            .update_request(id, &changes, scrap_equipment)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))?;

        if let Some(equipment_id) = scrap_equipment {
            tracing::info!(request_id = id, equipment_id, "Request scrapped, equipment marked as scrapped");
        } else {
            tracing::info!(request_id = id, status = %request.status, "Maintenance request updated");
        }
        Ok(RequestView::new(request, today))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete_request(id).await? {
            return Err(AppError::NotFound(format!("Maintenance request {} not found", id)));
        }
        tracing::info!(request_id = id, "Maintenance request deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        equipment::Equipment,
        request::{RequestStatus, RequestType},
    };
    use crate::repository::MockMaintenanceStore;
    use chrono::{Duration, Utc};
    use mockall::predicate::{always, eq};
    use serde_json::json;
    use tokio_test::assert_ok;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn equipment(id: i32, team_id: i32) -> Equipment {
        Equipment {
            id,
            name: "Central Air Conditioning Unit".into(),
            serial_number: "HVAC-003".into(),
            department: "Facilities".into(),
            location: "Building C - Roof".into(),
            purchase_date: NaiveDate::from_ymd_opt(2021, 3, 10).unwrap(),
            warranty_expiry: NaiveDate::from_ymd_opt(2026, 3, 10),
            maintenance_team_id: team_id,
            is_scrapped: false,
        }
    }

    fn stored(id: i32, new: &NewRequest) -> MaintenanceRequest {
        MaintenanceRequest {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            equipment_id: new.equipment_id,
            team_id: new.team_id,
            technician: new.technician.clone(),
            request_type: new.request_type,
            status: new.status,
            scheduled_date: new.scheduled_date,
            duration: new.duration,
            created_at: Utc::now(),
        }
    }

    fn existing(id: i32, status: RequestStatus) -> MaintenanceRequest {
        MaintenanceRequest {
            id,
            title: "AC Unit Filter Replacement".into(),
            description: None,
            equipment_id: 3,
            team_id: 3,
            technician: Some("Emma Davis".into()),
            request_type: RequestType::Preventive,
            status,
            scheduled_date: Some(today() - Duration::days(3)),
            duration: Some(1),
            created_at: Utc::now(),
        }
    }

    fn service(store: MockMaintenanceStore) -> RequestsService {
        RequestsService::new(Arc::new(store))
    }

    fn create_payload(equipment_id: i32) -> CreateRequest {
        serde_json::from_value(json!({
            "title": "AC Unit Filter Replacement",
            "equipment_id": equipment_id,
            "request_type": "Preventive",
            "scheduled_date": (today() - Duration::days(3)).to_string(),
            "team_id": 42
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_copies_team_from_equipment() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_find_equipment()
            .with(eq(3))
            .returning(|id| Ok(Some(equipment(id, 7))));
        store
            .expect_insert_request()
            .withf(|new| new.team_id == 7 && new.status == RequestStatus::New)
            .times(1)
            .returning(|new| Ok(stored(11, new)));

        let view = assert_ok!(service(store).create(&create_payload(3), today()).await);
        assert_eq!(view.request.team_id, 7);
        assert!(view.is_overdue);
    }

    #[tokio::test]
    async fn test_create_against_missing_equipment_writes_nothing() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_equipment().returning(|_| Ok(None));
        store.expect_insert_request().never();

        let err = service(store).create(&create_payload(99), today()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_scrap_cascades_to_equipment() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_find_request()
            .returning(|id| Ok(Some(existing(id, RequestStatus::InProgress))));
        store
            .expect_update_request()
            .with(eq(5), always(), eq(Some(3)))
            .times(1)
            .returning(|id, _, _| Ok(Some(existing(id, RequestStatus::Scrap))));

        let data = UpdateRequest { status: Some(RequestStatus::Scrap), ..Default::default() };
        let view = assert_ok!(service(store).update(5, &data, today()).await);
        assert_eq!(view.request.status, RequestStatus::Scrap);
        assert!(!view.is_overdue);
    }

    #[tokio::test]
    async fn test_other_statuses_do_not_cascade() {
        for status in [RequestStatus::New, RequestStatus::InProgress, RequestStatus::Repaired] {
            let mut store = MockMaintenanceStore::new();
            store
                .expect_find_request()
                .returning(|id| Ok(Some(existing(id, RequestStatus::New))));
            store
                .expect_update_request()
                .with(eq(5), always(), eq(None))
                .times(1)
                .returning(move |id, _, _| Ok(Some(existing(id, status))));

            let data = UpdateRequest { status: Some(status), ..Default::default() };
            let view = assert_ok!(service(store).update(5, &data, today()).await);
            assert_eq!(view.is_overdue, status != RequestStatus::Repaired);
        }
    }

    #[tokio::test]
    async fn test_update_unknown_request() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_request().returning(|_| Ok(None));
        store.expect_update_request().never();

        let data = UpdateRequest { status: Some(RequestStatus::Scrap), ..Default::default() };
        let err = service(store).update(404, &data, today()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_computes_overdue_per_request() {
        let mut store = MockMaintenanceStore::new();
        store.expect_list_requests().returning(|_| {
            Ok(vec![
                existing(1, RequestStatus::New),
                existing(2, RequestStatus::Repaired),
            ])
        });

        let views = assert_ok!(service(store).list(&RequestQuery::default(), today()).await);
        let flags: Vec<bool> = views.iter().map(|v| v.is_overdue).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[tokio::test]
    async fn test_delete() {
        let mut store = MockMaintenanceStore::new();
        store.expect_delete_request().with(eq(1)).returning(|_| Ok(true));
        store.expect_delete_request().with(eq(2)).returning(|_| Ok(false));

        let svc = service(store);
        assert_ok!(svc.delete(1).await);
        assert!(matches!(svc.delete(2).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_duration() {
        let mut store = MockMaintenanceStore::new();
        store.expect_find_request().never();
        store.expect_update_request().never();

        let data: UpdateRequest = serde_json::from_value(json!({ "duration": -5 })).unwrap();
        let err = service(store).update(1, &data, today()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_may_clear_duration() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_find_request()
            .returning(|id| Ok(Some(existing(id, RequestStatus::New))));
        store
            .expect_update_request()
            .withf(|_, changes, _| changes.duration == Some(None))
            .times(1)
            .returning(|id, _, _| Ok(Some(existing(id, RequestStatus::New))));

        let data: UpdateRequest = serde_json::from_value(json!({ "duration": null })).unwrap();
        assert_ok!(service(store).update(1, &data, today()).await);
    }
}
