mod common;

use common::MockBackend;
use jobsy::environment::AppConfig;
use jobsy::web::build_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;

const LISTING: &str = r#"{
    "active_applications": [
        {"id": 1, "company": "Acme", "position": "Backend Engineer", "status": "active",
         "stage": "Interview", "date": "2024-05-01", "location": "Berlin"},
        {"id": 2, "company": "Acme Labs", "position": "Data Engineer", "status": "pending",
         "stage": "Applied", "date": "2024-05-10", "location": null}
    ],
    "finished_applications": [
        {"id": 3, "company": "Globex", "position": "Designer", "status": "accepted",
         "stage": "Offer", "date": "2024-03-02"}
    ],
    "total_active": 2,
    "total_finished": 1
}"#;

async fn client_for(backend: &MockBackend) -> Client {
    let yaml = format!(
        "local:\n  server:\n    port: 0\n  backend:\n    base_url: \"{url}\"\n\
         production:\n  server:\n    port: 0\n  backend:\n    base_url: \"{url}\"\n",
        url = backend.base_url
    );
    let config = AppConfig::from_yaml(&yaml, "local").expect("valid config");
    Client::tracked(build_rocket(&config).expect("rocket builds"))
        .await
        .expect("valid rocket instance")
}

async fn json_body(response: rocket::local::asynchronous::LocalResponse<'_>) -> Value {
    let body = response.into_string().await.expect("response body");
    serde_json::from_str(&body).expect("JSON body")
}

#[tokio::test]
async fn search_runs_the_local_engine_over_the_listing() {
    let backend = MockBackend::builder()
        .route("GET", "/applications/u1", 200, LISTING)
        .start()
        .await;
    let client = client_for(&backend).await;

    let response = client
        .get("/api/applications/u1/search?query=acme&status=active")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    let data = &body["data"];

    assert_eq!(body["type"], "data");
    assert_eq!(data["total"], 1);
    assert_eq!(data["results"][0]["id"], 1);
    assert_eq!(data["results"][0]["company"], "Acme");
    assert_eq!(data["query"], "acme");
    assert_eq!(data["filters"]["status"], "active");
    assert_eq!(data["search_metadata"]["total_applications"], 3);
    assert!(data["search_metadata"]["execution_time"].is_string());
    assert_eq!(backend.requests(), vec!["GET /applications/u1"]);
}

#[tokio::test]
async fn search_without_criteria_returns_everything_in_order() {
    let backend = MockBackend::builder()
        .route("GET", "/applications/u1", 200, LISTING)
        .start()
        .await;
    let client = client_for(&backend).await;

    let response = client
        .get("/api/applications/u1/search?query=%20%20")
        .dispatch()
        .await;

    let body = json_body(response).await;
    let ids: Vec<i64> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(body["data"]["query"], "");
    assert_eq!(body["data"]["filters"], serde_json::json!({}));
}

#[tokio::test]
async fn search_by_date_range() {
    let backend = MockBackend::builder()
        .route("GET", "/applications/u1", 200, LISTING)
        .start()
        .await;
    let client = client_for(&backend).await;

    let response = client
        .get("/api/applications/u1/search?start_date=2024-05-01&end_date=2024-05-31")
        .dispatch()
        .await;

    let body = json_body(response).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["results"][1]["company"], "Acme Labs");
}

#[tokio::test]
async fn analytics_summarizes_the_listing() {
    let backend = MockBackend::builder()
        .route("GET", "/applications/u1", 200, LISTING)
        .start()
        .await;
    let client = client_for(&backend).await;

    let response = client.get("/api/applications/u1/analytics").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    let data = &body["data"];

    assert_eq!(data["total_applications"], 3);
    assert_eq!(data["active_applications"], 2);
    assert_eq!(data["finished_applications"], 1);
    assert_eq!(data["success_rate"], 100.0);
    assert_eq!(data["company_distribution"]["Acme"], 1);
    assert_eq!(data["stage_distribution"]["Applied"], 1);
}

#[tokio::test]
async fn listing_not_found_upstream_is_404() {
    let backend = MockBackend::builder().start().await;
    let client = client_for(&backend).await;

    let response = client.get("/api/applications/ghost/search").dispatch().await;

    assert_eq!(response.status(), Status::NotFound);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn scan_route_reports_emails_when_analysis_fails() {
    let backend = MockBackend::builder()
        .route(
            "POST",
            "/scan-emails",
            200,
            r#"{"emails": [{"id": "m1"}, {"id": "m2"}], "emailCount": 2}"#,
        )
        .route("POST", "/analyze-emails", 503, r#"{"detail": "busy"}"#)
        .start()
        .await;
    let client = client_for(&backend).await;

    let response = client
        .post("/api/scan-emails")
        .header(ContentType::JSON)
        .body(r#"{"userId": "u1"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email_count"], 2);
    assert_eq!(body["data"]["applications_found"], 0);
}

#[tokio::test]
async fn scan_route_returns_extracted_applications() {
    let backend = MockBackend::builder()
        .route(
            "POST",
            "/scan-emails",
            200,
            r#"{"emails": [{"id": "m1"}], "emailCount": 1}"#,
        )
        .route(
            "POST",
            "/analyze-emails",
            200,
            r#"{"applications": [{"company": "Initech", "position": "QA"}], "totalFound": 1}"#,
        )
        .route("POST", "/save-applications", 200, r#"{"message": "ok"}"#)
        .start()
        .await;
    let client = client_for(&backend).await;

    let response = client
        .post("/api/scan-emails")
        .header(ContentType::JSON)
        .body(r#"{"userId": "u1"}"#)
        .dispatch()
        .await;

    let body = json_body(response).await;
    assert_eq!(body["data"]["applications_found"], 1);
    assert_eq!(body["data"]["applications"][0]["company"], "Initech");
    assert_eq!(body["message"], "1 emails scanned, 1 applications found");
}
