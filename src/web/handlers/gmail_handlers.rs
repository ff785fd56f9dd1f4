// src/web/handlers/gmail_handlers.rs

use crate::core::BackendClient;
use crate::types::{GmailConnectResponse, GmailStatus, ScanSummary};
use crate::web::handlers::helpers::{backend_error, require_user_id};
use crate::web::types::{ActionResponse, ApiResult, DataResponse, UserRequest};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

pub async fn gmail_status_handler(user_id: &str, backend: &State<BackendClient>) -> Json<GmailStatus> {
    match backend.gmail_status(user_id.trim()).await {
        Ok(status) => Json(status),
        Err(e) => {
            warn!("Gmail status unavailable for {}: {:#}", user_id, e);
            Json(GmailStatus::disconnected())
        }
    }
}

pub async fn connect_gmail_handler(
    request: Json<UserRequest>,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<GmailConnectResponse>> {
    let user_id = require_user_id(&request.user_id)?;

    let response = backend
        .connect_gmail(user_id)
        .await
        .map_err(|e| backend_error(&e, "Connecting Gmail"))?;

    let message = if response.auth_url.is_some() {
        "Open the authorization URL to grant Gmail access".to_string()
    } else {
        response
            .message
            .clone()
            .unwrap_or_else(|| "Gmail connection started".to_string())
    };

    Ok(Json(DataResponse::success(message, response)))
}

pub async fn disconnect_gmail_handler(
    request: Json<UserRequest>,
    backend: &State<BackendClient>,
) -> ApiResult<ActionResponse> {
    let user_id = require_user_id(&request.user_id)?;

    let ack = backend
        .disconnect_gmail(user_id)
        .await
        .map_err(|e| backend_error(&e, "Disconnecting Gmail"))?;

    info!("Gmail disconnected for {}", user_id);

    Ok(Json(ActionResponse::success(
        ack.message
            .unwrap_or_else(|| "Gmail disconnected".to_string()),
        "gmail_disconnected".to_string(),
    )))
}

pub async fn scan_emails_handler(
    request: Json<UserRequest>,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<ScanSummary>> {
    let user_id = require_user_id(&request.user_id)?;

    let summary = backend
        .scan_emails(user_id)
        .await
        .map_err(|e| backend_error(&e, "Scanning emails"))?;

    Ok(Json(DataResponse::success(summary.message.clone(), summary)))
}
