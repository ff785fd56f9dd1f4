// src/web/handlers/application_handlers.rs

use crate::core::BackendClient;
use crate::search::{search, summarize, SearchAnalytics};
use crate::types::{
    ApplicationEmail, ApplicationUpdate, ApplicationsSnapshot, CreatedApplication,
    ManualApplication, Recommendation,
};
use crate::web::handlers::helpers::{backend_error, require_user_id};
use crate::web::types::{
    ActionResponse, ApiResult, DataResponse, SearchParams, StandardErrorResponse,
};

use rocket::http::Status;
use rocket::serde::json::{Json, Value};
use rocket::State;
use tracing::{info, warn};

pub async fn list_applications_handler(
    user_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<ApplicationsSnapshot>> {
    let user_id = require_user_id(user_id)?;

    let snapshot = backend
        .list_applications(user_id)
        .await
        .map_err(|e| backend_error(&e, "Loading applications"))?;

    let message = format!(
        "{} active, {} finished applications",
        snapshot.active_applications.len(),
        snapshot.finished_applications.len()
    );
    Ok(Json(DataResponse::success(message, snapshot)))
}

pub async fn create_application_handler(
    user_id: &str,
    application: Json<ManualApplication>,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<CreatedApplication>> {
    let user_id = require_user_id(user_id)?;

    let problems = application.validate();
    if !problems.is_empty() {
        return Err(StandardErrorResponse::new(
            "Application is incomplete".to_string(),
            "VALIDATION_ERROR".to_string(),
            problems,
        )
        .with_status(Status::BadRequest));
    }

    let created = backend
        .create_application(user_id, &application)
        .await
        .map_err(|e| backend_error(&e, "Creating application"))?;

    info!(
        "Created application {} - {} for {}",
        application.company_name, application.position, user_id
    );

    Ok(Json(DataResponse::success(
        format!("Application for {} created", application.company_name.trim()),
        created,
    )))
}

pub async fn update_application_handler(
    user_id: &str,
    application_id: &str,
    update: Json<ApplicationUpdate>,
    backend: &State<BackendClient>,
) -> ApiResult<ActionResponse> {
    let user_id = require_user_id(user_id)?;

    if update.is_empty() {
        return Err(StandardErrorResponse::new(
            "Nothing to update".to_string(),
            "EMPTY_UPDATE".to_string(),
            vec!["Send at least one field to change".to_string()],
        )
        .with_status(Status::BadRequest));
    }

    let ack = backend
        .update_application(user_id, application_id, &update)
        .await
        .map_err(|e| backend_error(&e, "Updating application"))?;

    Ok(Json(ActionResponse::success(
        ack.message
            .unwrap_or_else(|| format!("Application {} updated", application_id)),
        "application_updated".to_string(),
    )))
}

pub async fn delete_application_handler(
    user_id: &str,
    application_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<ActionResponse> {
    let user_id = require_user_id(user_id)?;

    let ack = backend
        .delete_application(user_id, application_id)
        .await
        .map_err(|e| backend_error(&e, "Deleting application"))?;

    info!("Deleted application {} for {}", application_id, user_id);

    Ok(Json(
        ActionResponse::success(
            ack.message
                .unwrap_or_else(|| format!("Application {} deleted", application_id)),
            "application_deleted".to_string(),
        )
        .with_next_actions(vec!["Reload the application list".to_string()]),
    ))
}

pub async fn application_email_handler(
    user_id: &str,
    application_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<ApplicationEmail>> {
    let user_id = require_user_id(user_id)?;

    let email = backend
        .application_email(user_id, application_id)
        .await
        .map_err(|e| backend_error(&e, "Loading application email"))?;

    Ok(Json(DataResponse::success(
        format!("Email for application {}", application_id),
        email,
    )))
}

pub async fn search_applications_handler(
    user_id: &str,
    params: SearchParams,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<Value>> {
    let user_id = require_user_id(user_id)?;

    let snapshot = backend
        .list_applications(user_id)
        .await
        .map_err(|e| backend_error(&e, "Searching applications"))?;

    let records = snapshot.records();
    let filters = params.filters();
    let outcome = search(&records, params.query(), &filters);

    info!(
        "Search by {} for '{}' matched {} of {}",
        user_id,
        outcome.query,
        outcome.total,
        records.len()
    );

    let message = format!("{} results found", outcome.total);
    // outcome borrows `records`; serialize while they are alive
    let data = rocket::serde::json::to_value(&outcome).map_err(|e| {
        backend_error(&anyhow::Error::new(e), "Rendering search results")
    })?;

    Ok(Json(DataResponse::success(message, data)))
}

pub async fn analytics_handler(
    user_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<SearchAnalytics>> {
    let user_id = require_user_id(user_id)?;

    let snapshot = backend
        .list_applications(user_id)
        .await
        .map_err(|e| backend_error(&e, "Computing analytics"))?;

    let analytics = summarize(&snapshot.records());

    Ok(Json(DataResponse::success(
        format!("Analytics over {} applications", analytics.total_applications),
        analytics,
    )))
}

pub async fn recommendations_handler(
    user_id: &str,
    backend: &State<BackendClient>,
) -> ApiResult<DataResponse<Vec<Recommendation>>> {
    let user_id = require_user_id(user_id)?;

    let recommendations = match backend.recommendations(user_id).await {
        Ok(recommendations) => recommendations,
        Err(e) => {
            warn!("Recommendations unavailable for {}: {:#}", user_id, e);
            Vec::new()
        }
    };

    Ok(Json(DataResponse::success(
        format!("{} recommendations", recommendations.len()),
        recommendations,
    )))
}
