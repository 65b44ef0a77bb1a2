//! API integration tests against a running server with a migrated database

use chrono::{Duration, Local, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api";

/// Suffix keeping names and serial numbers unique across runs
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_micros())
}

async fn create(client: &Client, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED, "POST {} failed", path);
    response.json().await.expect("Failed to parse response")
}

async fn get(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn put(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn delete(client: &Client, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();
    let (status, body) = get(&client, "/health").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();
    let (status, body) = get(&client, "/ready").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_team_name_conflicts() {
    let client = Client::new();
    let name = unique("Electrical Team");
    let team = create(&client, "/teams", json!({ "name": name, "members": "John Smith" })).await;

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let id = team["id"].as_i64().unwrap();
    assert_eq!(delete(&client, &format!("/teams/{}", id)).await, StatusCode::OK);
    assert_eq!(get(&client, &format!("/teams/{}", id)).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_request_lifecycle_scraps_equipment() {
    let client = Client::new();
    let today = Local::now().date_naive();

    let team = create(
        &client,
        "/teams",
        json!({ "name": unique("HVAC Team"), "members": "Emma Davis, Frank Miller" }),
    )
    .await;
    let team_id = team["id"].as_i64().unwrap();

    let serial = unique("HVAC");
    let equipment = create(
        &client,
        "/equipment",
        json!({
            "name": "Rooftop Air Handler",
            "serial_number": serial,
            "department": "Facilities",
            "location": "Building C - Roof",
            "purchase_date": "2021-03-10",
            "maintenance_team_id": team_id
        }),
    )
    .await;
    let equipment_id = equipment["id"].as_i64().unwrap();
    assert_eq!(equipment["is_scrapped"], false);

    let request = create(
        &client,
        "/maintenance-requests",
        json!({
            "title": "Filter replacement",
            "equipment_id": equipment_id,
            "request_type": "Preventive",
            "scheduled_date": (today - Duration::days(3)).to_string()
        }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();
    assert_eq!(request["team_id"], team_id);
    assert_eq!(request["status"], "New");
    assert_eq!(request["is_overdue"], true);

    let (_, details) = get(&client, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(details["maintenance_count"], 1);

    // Moving the equipment to another team leaves existing requests on the old one
    let other_team = create(&client, "/teams", json!({ "name": unique("Mechanical Team") })).await;
    let other_team_id = other_team["id"].as_i64().unwrap();
    let (status, moved) = put(
        &client,
        &format!("/equipment/{}", equipment_id),
        json!({ "maintenance_team_id": other_team_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["maintenance_team_id"], other_team_id);
    let (_, request) = get(&client, &format!("/maintenance-requests/{}", request_id)).await;
    assert_eq!(request["team_id"], team_id);

    let (status, repaired) = put(
        &client,
        &format!("/maintenance-requests/{}", request_id),
        json!({ "status": "Repaired" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repaired["is_overdue"], false);
    let (_, equipment) = get(&client, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(equipment["is_scrapped"], false);

    let (status, _) = put(
        &client,
        &format!("/maintenance-requests/{}", request_id),
        json!({ "status": "Scrap" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, equipment) = get(&client, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(equipment["is_scrapped"], true);

    let (status, _) = put(
        &client,
        &format!("/equipment/{}", equipment_id),
        json!({ "is_scrapped": false }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Deleting teams keeps the equipment and requests that reference them
    assert_eq!(delete(&client, &format!("/teams/{}", other_team_id)).await, StatusCode::OK);
    assert_eq!(delete(&client, &format!("/teams/{}", team_id)).await, StatusCode::OK);
    let (status, equipment) = get(&client, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(equipment["maintenance_team_id"], other_team_id);
    let (status, request) = get(&client, &format!("/maintenance-requests/{}", request_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request["team_id"], team_id);

    assert_eq!(delete(&client, &format!("/equipment/{}", equipment_id)).await, StatusCode::OK);
    let (status, _) = get(&client, &format!("/maintenance-requests/{}", request_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_invalid_status_is_rejected() {
    let client = Client::new();
    let (status, _) = put(&client, "/maintenance-requests/1", json!({ "status": "Done" })).await;
    assert!(status.is_client_error());
}

#[tokio::test]
#[ignore]
async fn test_dashboard() {
    let client = Client::new();
    let (status, body) = get(&client, "/dashboard").await;

    assert!(status.is_success());
    assert!(body["equipment_count"].is_i64());
    assert!(body["overdue_count"].as_i64().unwrap() <= body["requests_count"].as_i64().unwrap());
    assert_eq!(body["by_status"].as_array().map(Vec::len), Some(4));
}
