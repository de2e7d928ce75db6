// libs/doctor-cell/tests/handlers_test.rs
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{sample_directory, MICHAEL_ID, SARAH_ID};

fn create_test_app() -> Router {
    doctor_routes(Arc::new(sample_directory()))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections answer in plain text
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_search_without_filters_lists_everyone() {
    let (status, body) = get_json(create_test_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["doctors"][0]["name"], "Dr. Sarah Johnson");
    assert_eq!(body["doctors"][2]["name"], "Dr. Anish Sonar");
}

#[tokio::test]
async fn test_search_by_name() {
    let (status, body) = get_json(create_test_app(), "/?query=sarah&specialty=all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["specialty"], "Cardiology");
}

#[tokio::test]
async fn test_search_by_specialty() {
    let (status, body) = get_json(create_test_app(), "/?specialty=Dermatology").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["name"], "Dr. Michael Chen");

    let (_, none) = get_json(create_test_app(), "/?specialty=Pediatrics").await;
    assert_eq!(none["total"], 0);
}

#[tokio::test]
async fn test_list_specialties() {
    let (status, body) = get_json(create_test_app(), "/specialties").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["specialties"],
        serde_json::json!(["Cardiology", "Dermatology", "Neurologist"])
    );
}

#[tokio::test]
async fn test_get_doctor() {
    let (status, body) = get_json(create_test_app(), &format!("/{}", MICHAEL_ID)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor"]["name"], "Dr. Michael Chen");
    assert_eq!(body["availability_label"], "Currently Unavailable");
    assert_eq!(body["portrait"]["kind"], "initials");
    assert_eq!(body["portrait"]["value"], "MC");
    assert_eq!(body["fee_label"], Value::Null);
}

#[tokio::test]
async fn test_get_doctor_profile_details() {
    let (status, body) = get_json(create_test_app(), &format!("/{}", SARAH_ID)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor"]["consultation_fee"], 1500);
    assert!(body["doctor"]["about"].as_str().unwrap().contains("cardiology"));
    assert_eq!(body["fee_label"], "₹1,500");
    assert_eq!(body["availability_label"], "Available Now");
}

#[tokio::test]
async fn test_get_unknown_doctor_is_not_found() {
    let (status, body) = get_json(create_test_app(), &format!("/{}", Uuid::from_u128(99))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_get_availability() {
    let (status, body) = get_json(create_test_app(), &format!("/{}/availability", SARAH_ID)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctor_name"], "Dr. Sarah Johnson");
    let slots = body["available_slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["date"], "2024-03-10");
    assert_eq!(slots[0]["times"][1], "11:30 AM");
}

#[tokio::test]
async fn test_doctor_without_availability_has_no_slots() {
    let (status, body) = get_json(create_test_app(), &format!("/{}/availability", MICHAEL_ID)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["available_slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_times_for_date() {
    let (status, body) =
        get_json(create_test_app(), &format!("/{}/availability/2024-03-11", SARAH_ID)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["times"], serde_json::json!(["09:00 AM", "12:00 PM", "3:00 PM"]));

    let (status, body) =
        get_json(create_test_app(), &format!("/{}/availability/2024-04-01", SARAH_ID)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["times"], serde_json::json!([]));
}

#[tokio::test]
async fn test_malformed_date_is_rejected() {
    let (status, _) =
        get_json(create_test_app(), &format!("/{}/availability/tomorrow", SARAH_ID)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
