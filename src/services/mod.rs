//! Business logic services

pub mod dashboard;
pub mod equipment;
pub mod requests;
pub mod seed;
pub mod teams;

use std::sync::Arc;

use crate::repository::MaintenanceStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn MaintenanceStore>,
    pub teams: teams::TeamsService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self {
            teams: teams::TeamsService::new(store.clone()),
            equipment: equipment::EquipmentService::new(store.clone()),
            requests: requests::RequestsService::new(store.clone()),
            dashboard: dashboard::DashboardService::new(store.clone()),
            store,
        }
    }
}
