//! Maintenance business rules.
//!
//! Everything here is a pure function of its inputs: no store access, no
//! clock. Services gather the records, call into these rules and persist
//! whatever they decide.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::request::{MaintenanceRequest, RequestChanges, RequestStatus},
};

/// A request is overdue when its scheduled date lies before `today` and it has
/// not reached a terminal status. Unscheduled requests are never overdue.
pub fn is_overdue(scheduled_date: Option<NaiveDate>, status: RequestStatus, today: NaiveDate) -> bool {
    match scheduled_date {
        Some(date) => date < today && !status.is_terminal(),
        None => false,
    }
}

/// Fail with Conflict when a natural key is already held by another record.
///
/// `holder` is the id of the record currently using the value, if any;
/// `updating` is the id of the record being written (None on insert).
pub fn ensure_unique(holder: Option<i32>, updating: Option<i32>, message: &str) -> AppResult<()> {
    match holder {
        Some(id) if Some(id) != updating => Err(AppError::Conflict(message.to_string())),
        _ => Ok(()),
    }
}

/// Equipment to scrap as a side effect of applying `changes` to `request`.
///
/// Only an update that sets the status to Scrap cascades.
pub fn scrap_cascade_target(request: &MaintenanceRequest, changes: &RequestChanges) -> Option<i32> {
    match changes.status {
        Some(RequestStatus::Scrap) => Some(request.equipment_id),
        _ => None,
    }
}

/// `is_scrapped` only moves from false to true.
pub fn check_scrapped_flag(current: bool, requested: Option<bool>) -> AppResult<()> {
    if current && requested == Some(false) {
        return Err(AppError::BusinessRule(
            "Scrapped equipment cannot be restored".to_string(),
        ));
    }
    Ok(())
}

/// Number of requests in one status
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: RequestStatus,
    pub count: i64,
}

/// Dashboard aggregate counts
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardCounts {
    pub equipment_count: i64,
    pub requests_count: i64,
    pub teams_count: i64,
    pub overdue_count: i64,
    /// Request count per status, in lifecycle order
    pub by_status: Vec<StatusCount>,
}

impl DashboardCounts {
    pub fn tally(
        equipment_count: i64,
        teams_count: i64,
        requests: &[MaintenanceRequest],
        today: NaiveDate,
    ) -> Self {
        let overdue_count = requests.iter().filter(|r| r.is_overdue(today)).count() as i64;
        let by_status = RequestStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: requests.iter().filter(|r| r.status == *status).count() as i64,
            })
            .collect();

        Self {
            equipment_count,
            requests_count: requests.len() as i64,
            teams_count,
            overdue_count,
            by_status,
        }
    }
}
