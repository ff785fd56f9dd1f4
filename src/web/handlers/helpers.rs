// src/web/handlers/helpers.rs
//! Shared error mapping for the gateway handlers

use rocket::http::Status;
use tracing::error;

use crate::core::BackendStatusError;
use crate::web::types::{ApiError, StandardErrorResponse};

/// Turn an upstream failure into the gateway's error response
pub fn backend_error(error: &anyhow::Error, action: &str) -> ApiError {
    error!("{} failed: {:#}", action, error);

    let (status, error_code, suggestions) = categorize_error(error);
    StandardErrorResponse::new(format!("{} failed", action), error_code, suggestions)
        .with_status(status)
}

pub fn categorize_error(error: &anyhow::Error) -> (Status, String, Vec<String>) {
    if let Some(backend) = find_cause::<BackendStatusError>(error) {
        return if backend.status == reqwest::StatusCode::NOT_FOUND {
            (
                Status::NotFound,
                "NOT_FOUND".to_string(),
                vec![
                    "Check the user and application identifiers".to_string(),
                    "Reload the application list".to_string(),
                ],
            )
        } else {
            (
                Status::BadGateway,
                "BACKEND_ERROR".to_string(),
                vec![
                    "The tracking service rejected the request".to_string(),
                    "Try again in a few moments".to_string(),
                ],
            )
        };
    }

    if find_cause::<reqwest::Error>(error).is_some_and(|e| e.is_decode()) {
        return (
            Status::BadGateway,
            "BACKEND_RESPONSE_ERROR".to_string(),
            vec!["The tracking service returned an unexpected response".to_string()],
        );
    }

    if find_cause::<reqwest::Error>(error).is_some() {
        return (
            Status::BadGateway,
            "BACKEND_UNAVAILABLE".to_string(),
            vec![
                "The tracking service is not reachable".to_string(),
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        );
    }

    (
        Status::InternalServerError,
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    )
}

/// 400 for a blank user id in a path or body
pub fn require_user_id(user_id: &str) -> Result<&str, ApiError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(StandardErrorResponse::new(
            "User ID is required".to_string(),
            "MISSING_USER_ID".to_string(),
            vec!["Sign in again and retry".to_string()],
        )
        .with_status(Status::BadRequest));
    }
    Ok(trimmed)
}

fn find_cause<E>(error: &anyhow::Error) -> Option<&E>
where
    E: std::error::Error + 'static,
{
    error.chain().find_map(|cause| cause.downcast_ref::<E>())
}
