use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use section_slotter::server::app;
use tower::ServiceExt;

async fn call(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn catalog() -> Value {
    json!([
        {"program": "BBA", "semester": "1", "courseCode": "MGT101", "courseTitle": "Intro"},
        {"program": "BBA", "semester": "1", "courseCode": "CS110", "courseTitle": "Data"},
        {"program": "BBA", "courseCode": "X", "courseTitle": "No semester"}
    ])
}

#[tokio::test]
async fn solve_returns_report() {
    let (status, body) = call(post_json(
        "/v1/schedule/solve",
        json!({
            "program": "BBA",
            "semester": "1",
            "catalog": catalog(),
            "studentCounts": {"BBA": 45},
            "seed": 17,
            "catalogId": "2024"
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["rows"].as_array().unwrap().len(), 4);
    assert_eq!(report["summary"].as_array().unwrap().len(), 2);
    assert_eq!(report["category"], "standard");
    assert_eq!(report["fileName"], "BBA_1_2024_schedule.csv");
}

#[tokio::test]
async fn seeded_requests_are_reproducible() {
    let request = || {
        post_json(
            "/v1/schedule/solve",
            json!({
                "program": "BBA",
                "semester": "1",
                "catalog": catalog(),
                "studentCounts": {"BBA": 200},
                "seed": 99
            }),
        )
    };
    let (_, first) = call(request()).await;
    let (_, second) = call(request()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn invalid_count_is_bad_request() {
    let (status, _) = call(post_json(
        "/v1/schedule/solve",
        json!({
            "program": "BBA",
            "semester": "1",
            "catalog": catalog(),
            "studentCounts": {"BBA": 0}
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(post_json(
        "/v1/schedule/solve",
        json!({
            "program": "BBA",
            "semester": "1",
            "catalog": catalog(),
            "studentCounts": {"BBA": 40_000_000},
            "capacity": 1
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("limit"));
}

#[tokio::test]
async fn empty_catalog_is_not_found() {
    let (status, body) = call(post_json(
        "/v1/schedule/solve",
        json!({
            "program": "BBA",
            "semester": "8",
            "catalog": catalog(),
            "studentCounts": {"BBA": 40}
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8(body).unwrap().contains("No courses found"));
}

#[tokio::test]
async fn solve_all_lists_reports() {
    let (status, body) = call(post_json(
        "/v1/schedule/solve-all",
        json!({
            "semester": "1",
            "catalog": catalog(),
            "studentCounts": {"BBA": 40}
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    let batch: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(batch["reports"].as_array().unwrap().len(), 1);
    assert!(batch["skipped"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn slot_listing_by_category() {
    let get = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();

    let (status, body) = call(get("/v1/slots?category=standard&weekends=false")).await;
    assert_eq!(status, StatusCode::OK);
    let slots: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0]["day"], "Monday / Wednesday");

    let (_, body) = call(get("/v1/slots?category=evening&weekends=false")).await;
    let slots: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0]["day"], "Saturday");
}
