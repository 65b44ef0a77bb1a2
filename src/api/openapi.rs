//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{dashboard, equipment, health, requests, teams};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "0.3.0",
        description = "Maintenance Management System REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::delete_team,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Maintenance requests
        requests::list_requests,
        requests::get_request,
        requests::create_request,
        requests::update_request,
        requests::delete_request,
        // Dashboard
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            // Teams
            crate::models::team::Team,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Maintenance requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::RequestView,
            crate::models::request::RequestType,
            crate::models::request::RequestStatus,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequest,
            // Dashboard
            crate::rules::DashboardCounts,
            crate::rules::StatusCount,
            // Common
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "teams", description = "Maintenance team management"),
        (name = "equipment", description = "Equipment management"),
        (name = "maintenance-requests", description = "Maintenance work orders"),
        (name = "dashboard", description = "Aggregate counts")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
