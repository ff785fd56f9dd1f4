// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::BackendClient;
use crate::environment::AppConfig;
use crate::types::{
    ApplicationEmail, ApplicationUpdate, ApplicationsSnapshot, CreatedApplication,
    GmailConnectResponse, GmailStatus, ManualApplication, Recommendation, ScanSummary,
};
use crate::search::SearchAnalytics;
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::{Json, Value};
use rocket::{
    catchers, delete, get, options, post, put, routes, Build, Request, Response, Rocket, State,
};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[get("/health")]
pub async fn health(backend: &State<BackendClient>) -> Json<TextResponse> {
    handlers::health_handler(backend).await
}

#[get("/applications/<user_id>")]
pub async fn list_applications(
    user_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<ApplicationsSnapshot>> {
    handlers::list_applications_handler(user_id, backend).await
}

#[post("/applications/<user_id>", data = "<application>")]
pub async fn create_application(
    user_id: &str,
    application: Json<ManualApplication>,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<CreatedApplication>> {
    handlers::create_application_handler(user_id, application, backend).await
}

#[put("/applications/<user_id>/<application_id>", data = "<update>")]
pub async fn update_application(
    user_id: &str,
    application_id: &str,
    update: Json<ApplicationUpdate>,
    backend: &State<BackendClient>,
) -> ApiResult<ActionResponse> {
    handlers::update_application_handler(user_id, application_id, update, backend).await
}

#[delete("/applications/<user_id>/<application_id>")]
pub async fn delete_application(
    user_id: &str,
    application_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<ActionResponse> {
    handlers::delete_application_handler(user_id, application_id, backend).await
}

#[get("/applications/<user_id>/<application_id>/email")]
pub async fn application_email(
    user_id: &str,
    application_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<ApplicationEmail>> {
    handlers::application_email_handler(user_id, application_id, backend).await
}

#[get("/applications/<user_id>/search?<params..>")]
pub async fn search_applications(
    user_id: &str,
    params: SearchParams,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<Value>> {
    handlers::search_applications_handler(user_id, params, backend).await
}

#[get("/applications/<user_id>/analytics")]
pub async fn application_analytics(
    user_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<SearchAnalytics>> {
    handlers::analytics_handler(user_id, backend).await
}

#[get("/recommendations/<user_id>")]
pub async fn recommendations(
    user_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<Vec<Recommendation>>> {
    handlers::recommendations_handler(user_id, backend).await
}

#[get("/gmail/status/<user_id>")]
pub async fn gmail_status(user_id: &str, backend: &State<BackendClient>) -> Json<GmailStatus> {
    handlers::gmail_status_handler(user_id, backend).await
}

#[post("/connect-gmail", data = "<request>")]
pub async fn connect_gmail(
    request: Json<UserRequest>,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<GmailConnectResponse>> {
    handlers::connect_gmail_handler(request, backend).await
}

#[post("/disconnect-gmail", data = "<request>")]
pub async fn disconnect_gmail(
    request: Json<UserRequest>,
    backend: &State<BackendClient>,
) -> ApiResult<ActionResponse> {
    handlers::disconnect_gmail_handler(request, backend).await
}

#[post("/scan-emails", data = "<request>")]
pub async fn scan_emails(
    request: Json<UserRequest>,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<ScanSummary>> {
    handlers::scan_emails_handler(request, backend).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("No route for {} {}", request.method(), request.uri()),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec!["Verify field names and types".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the gateway without launching it
pub fn build_rocket(config: &AppConfig) -> Result<Rocket<Build>> {
    let backend = BackendClient::new(&config.backend)?;

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address))
        .merge(("port", config.server.port));

    Ok(rocket::custom(figment)
        .attach(Cors)
        .manage(backend)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                health,
                list_applications,
                create_application,
                update_application,
                delete_application,
                application_email,
                search_applications,
                application_analytics,
                recommendations,
                gmail_status,
                connect_gmail,
                disconnect_gmail,
                scan_emails,
                options,
            ],
        ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    info!("Starting jobsy gateway");
    info!("Backend: {}", config.backend.base_url);
    info!(
        "Server: http://{}:{}",
        config.server.address, config.server.port
    );

    let _rocket = build_rocket(&config)?
        .launch()
        .await
        .context("Gateway stopped with an error")?;

    Ok(())
}
