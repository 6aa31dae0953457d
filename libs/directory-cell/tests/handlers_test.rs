// libs/directory-cell/tests/handlers_test.rs

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use directory_cell::{create_directory_router, demo_directory, DirectoryService};

fn app() -> Router {
    create_directory_router(Arc::new(DirectoryService::new(Arc::new(demo_directory()))))
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_list_hospitals_with_filters() {
    let (status, json) = get_json("/hospitals?location=Lakeside").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["hospitals"][0]["id"], "h2");
}

#[tokio::test]
async fn test_list_hospitals_by_min_rating() {
    let (status, json) = get_json("/hospitals?min_rating=4.2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
}

#[tokio::test]
async fn test_get_hospital_includes_doctors() {
    let (status, json) = get_json("/hospitals/h1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hospital"]["name"], "City General Hospital");
    assert_eq!(json["doctors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_hospital_doctors() {
    let (status, json) = get_json("/hospitals/h2/doctors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert!(json["doctors"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["hospital_id"] == "h2"));
}

#[tokio::test]
async fn test_unknown_hospital_is_not_found() {
    let (status, json) = get_json("/hospitals/h404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("h404"));
}

#[tokio::test]
async fn test_search_doctors_by_name() {
    let (status, json) = get_json("/doctors?search=chen").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["doctors"][0]["id"], "d2");
}

#[tokio::test]
async fn test_get_doctor_with_availability() {
    let (status, json) = get_json("/doctors/d1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hospital"]["id"], "h1");
    assert_eq!(json["availability"]["2025-02-10"][0], "9:00 AM");
}

#[tokio::test]
async fn test_filter_options() {
    let (status, json) = get_json("/filters").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["locations"].as_array().unwrap().len(), 3);
    assert!(json["specializations"]
        .as_array()
        .unwrap()
        .contains(&Value::from("Cardiology")));
}
