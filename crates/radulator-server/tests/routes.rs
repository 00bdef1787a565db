use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use radulator_server::state::AppState;

fn app() -> Router {
    radulator_server::router(
        AppState::new(radulator_calculators::default_registry()),
        CorsLayer::permissive(),
    )
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["calculators"], 22);
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let (status, body) = get("/calculators").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_lowercase())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn list_filters_by_query() {
    let (status, body) = get("/calculators?q=washout").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"adrenal-ct"));
    assert!(!ids.contains(&"shim"));
}

#[tokio::test]
async fn detail_includes_fields_without_predicates() {
    let (status, body) = get("/calculators/milan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "milan");
    let fields = body["fields"].as_array().unwrap();
    assert!(fields.iter().any(|f| f["id"] == "tumor2"));
    assert!(fields.iter().all(|f| f.get("show_if").is_none()));
}

#[tokio::test]
async fn unknown_calculator_is_404() {
    let (status, body) = get("/calculators/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "unknown calculator: does-not-exist");

    let (status, _) = post("/calculators/does-not-exist/compute", &json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn compute_returns_report() {
    let (status, body) = post(
        "/calculators/albi/compute",
        &json!({ "albumin": 35, "bilirubin": "20", "units": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calculator_id"], "albi");
    assert_eq!(body["outcome"]["status"], "report");
    assert_eq!(body["outcome"]["severity"], "warning");
    let rows = body["outcome"]["rows"].as_array().unwrap();
    assert_eq!(rows[0], json!({ "label": "ALBI Score", "value": "-2.12" }));
    assert_eq!(rows[1], json!({ "label": "ALBI Grade", "value": "Grade 2" }));
}

#[tokio::test]
async fn compute_returns_invalid_outcome_for_bad_input() {
    let (status, body) = post("/calculators/shim/compute", &json!({ "q1": "5" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "invalid");
    assert_eq!(
        body["outcome"]["message"],
        "Please answer all five questions."
    );
}

#[tokio::test]
async fn compute_rejects_non_object_body() {
    let (status, body) = post("/calculators/albi/compute", &json!([1, 2, 3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("an array"));
}

#[tokio::test]
async fn compute_rejects_malformed_json() {
    let (status, body) = send(
        Request::builder()
            .method(Method::POST)
            .uri("/calculators/albi/compute")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn visibility_follows_answers() {
    let (status, body) = post(
        "/calculators/milan/visibility",
        &json!({ "count": "1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let visible = body["visible_fields"].as_array().unwrap();
    assert!(!visible.contains(&json!("tumor2")));

    let (_, body) = post(
        "/calculators/milan/visibility",
        &json!({ "count": "3" }),
    )
    .await;
    let visible = body["visible_fields"].as_array().unwrap();
    assert!(visible.contains(&json!("tumor2")));
    assert!(visible.contains(&json!("tumor3")));
}

#[tokio::test]
async fn categories_follow_preferred_order() {
    let (status, body) = get("/categories").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.first(), Some(&"Neuroradiology"));
    assert_eq!(names.last(), Some(&"Radiation Safety"));
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|c| !c["calculators"].as_array().unwrap().is_empty()));
}

#[tokio::test]
async fn single_category_and_missing_category() {
    let (status, body) = get("/categories/Hepatology").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["calculators"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"albi"));
    assert!(ids.contains(&"meld-na"));

    let (status, body) = get("/categories/Dermatology").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "category not found: Dermatology");
}

#[tokio::test]
async fn tags_are_sorted_and_unique() {
    let (status, body) = get("/tags").await;
    assert_eq!(status, StatusCode::OK);
    let tags: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    let mut expected = tags.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(tags, expected);
    assert!(tags.contains(&"liver"));
}
