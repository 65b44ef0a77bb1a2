//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{today, MessageResponse};
use crate::{
    error::AppResult,
    models::request::{CreateRequest, RequestQuery, RequestView, UpdateRequest},
    AppState,
};

/// List maintenance requests with their overdue flag
#[utoipa::path(
    get,
    path = "/maintenance-requests",
    tag = "maintenance-requests",
    params(RequestQuery),
    responses(
        (status = 200, description = "Request list", body = Vec<RequestView>)
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<RequestView>>> {
    let requests = state.services.requests.list(&query, today()).await?;
    Ok(Json(requests))
}

/// Get maintenance request by ID
#[utoipa::path(
    get,
    path = "/maintenance-requests/{id}",
    tag = "maintenance-requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = RequestView),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RequestView>> {
    let request = state.services.requests.get_view(id, today()).await?;
    Ok(Json(request))
}

/// Create maintenance request (team is taken from the equipment)
#[utoipa::path(
    post,
    path = "/maintenance-requests",
    tag = "maintenance-requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = RequestView),
        (status = 400, description = "Missing title", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown request type")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestView>)> {
    let request = state.services.requests.create(&data, today()).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Update maintenance request; setting status to Scrap scraps the equipment
#[utoipa::path(
    put,
    path = "/maintenance-requests/{id}",
    tag = "maintenance-requests",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = RequestView),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown status or request type")
    )
)]
pub async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRequest>,
) -> AppResult<Json<RequestView>> {
    let request = state.services.requests.update(id, &data, today()).await?;
    Ok(Json(request))
}

/// Delete maintenance request
#[utoipa::path(
    delete,
    path = "/maintenance-requests/{id}",
    tag = "maintenance-requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.requests.delete(id).await?;
    Ok(Json(MessageResponse::new("Maintenance request deleted successfully")))
}
