//! Dashboard service

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::request::RequestQuery,
    repository::MaintenanceStore,
    rules::DashboardCounts,
};

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn MaintenanceStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    /// Current counts, read fresh from the store on every call
    pub async fn counts(&self, today: NaiveDate) -> AppResult<DashboardCounts> {
        let equipment_count = self.store.count_equipment().await?;
        let teams_count = self.store.count_teams().await?;
        let requests = self.store.list_requests(&RequestQuery::default()).await?;
        Ok(DashboardCounts::tally(equipment_count, teams_count, &requests, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::{MaintenanceRequest, RequestStatus, RequestType};
    use crate::repository::MockMaintenanceStore;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_counts_reflect_store_on_each_call() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let overdue = MaintenanceRequest {
            id: 4,
            title: "Overdue Inspection".into(),
            description: None,
            equipment_id: 4,
            team_id: 2,
            technician: None,
            request_type: RequestType::Preventive,
            status: RequestStatus::New,
            scheduled_date: Some(today - Duration::days(10)),
            duration: Some(3),
            created_at: Utc::now(),
        };

        let mut store = MockMaintenanceStore::new();
        store.expect_count_equipment().times(2).returning(|| Ok(4));
        store.expect_count_teams().times(2).returning(|| Ok(3));
        let mut calls = 0;
        store.expect_list_requests().times(2).returning(move |_| {
            calls += 1;
            let mut r = overdue.clone();
            if calls > 1 {
                r.status = RequestStatus::Repaired;
            }
            Ok(vec![r])
        });

        let svc = DashboardService::new(Arc::new(store));
        let first = svc.counts(today).await.unwrap();
        assert_eq!((first.equipment_count, first.teams_count, first.requests_count), (4, 3, 1));
        assert_eq!(first.overdue_count, 1);

        let second = svc.counts(today).await.unwrap();
        assert_eq!(second.overdue_count, 0);
    }
}
