// src/web/handlers/system_handlers.rs
use crate::core::BackendClient;
use crate::web::types::TextResponse;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(backend: &State<BackendClient>) -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success(format!(
        "OK (backend: {})",
        backend.base_url()
    )))
}
