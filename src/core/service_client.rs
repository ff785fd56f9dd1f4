// src/core/service_client.rs
//! HTTP client for the job-tracking backend (applications, Gmail, recommendations)

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{info, trace, warn};

use crate::environment::BackendConfig;
use crate::types::response::{
    BackendEnvelope, EmailAnalysisResponse, EmailScanResponse, RecommendationsPayload,
};
use crate::types::{
    ApplicationEmail, ApplicationUpdate, ApplicationsSnapshot, BackendAck, CreatedApplication,
    GmailConnectResponse, GmailStatus, ManualApplication, Recommendation, ScanSummary,
};
use crate::utils::join_url;

const APPLICATIONS_ENDPOINT: &str = "/applications";
const CREATE_MANUAL_ENDPOINT: &str = "/applications/create-manual";
const GMAIL_STATUS_ENDPOINT: &str = "/gmail/status";
const GMAIL_CONNECT_ENDPOINT: &str = "/gmail/connect";
const GMAIL_DISCONNECT_ENDPOINT: &str = "/disconnect-gmail";
const SCAN_EMAILS_ENDPOINT: &str = "/scan-emails";
const ANALYZE_EMAILS_ENDPOINT: &str = "/analyze-emails";
const SAVE_APPLICATIONS_ENDPOINT: &str = "/save-applications";
const RECOMMENDATIONS_ENDPOINT: &str = "/search/recommendations";

/// Backend reply used when the user has not applied anywhere yet
const NO_APPLICATIONS_MARKER: &str = "Henüz başvuru yapmadığınız";

/// Non-success HTTP status returned by the backend
#[derive(Debug, Clone)]
pub struct BackendStatusError {
    pub status: StatusCode,
    pub body: String,
}

impl fmt::Display for BackendStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Backend returned error status {}: {}", self.status, self.body)
    }
}

impl std::error::Error for BackendStatusError {}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    fn application_url(&self, user_id: &str, application_id: Option<&str>) -> String {
        match application_id {
            Some(app_id) => self.url(&format!("{}/{}/{}", APPLICATIONS_ENDPOINT, user_id, app_id)),
            None => self.url(&format!("{}/{}", APPLICATIONS_ENDPOINT, user_id)),
        }
    }

    /// 1. All applications of a user, split active/finished as the backend stores them
    pub async fn list_applications(&self, user_id: &str) -> Result<ApplicationsSnapshot> {
        let url = self.application_url(user_id, None);
        info!("Fetching applications for {}", user_id);

        let snapshot: ApplicationsSnapshot = self
            .send_json(self.client.get(&url), &url)
            .await
            .context("Failed to fetch applications")?;

        trace!(
            "Backend returned {} active and {} finished applications",
            snapshot.active_applications.len(),
            snapshot.finished_applications.len()
        );
        Ok(snapshot)
    }

    /// 2. Manual entry
    pub async fn create_application(
        &self,
        user_id: &str,
        application: &ManualApplication,
    ) -> Result<CreatedApplication> {
        let url = self.url(CREATE_MANUAL_ENDPOINT);

        let mut payload =
            serde_json::to_value(application).context("Failed to serialize application")?;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("userId".to_string(), serde_json::json!(user_id));
        }

        info!(
            "Creating manual application for {}: {} - {}",
            user_id, application.company_name, application.position
        );

        self.send_json(self.client.post(&url).json(&payload), &url)
            .await
            .context("Failed to create application")
    }

    /// 3. Partial update of one application
    pub async fn update_application(
        &self,
        user_id: &str,
        application_id: &str,
        update: &ApplicationUpdate,
    ) -> Result<BackendAck> {
        let url = self.application_url(user_id, Some(application_id));
        info!("Updating application {} for {}", application_id, user_id);

        self.send_json(self.client.put(&url).json(update), &url)
            .await
            .context("Failed to update application")
    }

    /// 4. Delete one application
    pub async fn delete_application(&self, user_id: &str, application_id: &str) -> Result<BackendAck> {
        let url = self.application_url(user_id, Some(application_id));
        info!("Deleting application {} for {}", application_id, user_id);

        self.send_json(self.client.delete(&url), &url)
            .await
            .context("Failed to delete application")
    }

    /// 5. Source email of an application
    pub async fn application_email(
        &self,
        user_id: &str,
        application_id: &str,
    ) -> Result<ApplicationEmail> {
        let url = format!("{}/email", self.application_url(user_id, Some(application_id)));

        self.send_json(self.client.get(&url), &url)
            .await
            .context("Failed to fetch application email")
    }

    /// 6. Gmail link state for a user
    pub async fn gmail_status(&self, user_id: &str) -> Result<GmailStatus> {
        let url = self.url(&format!("{}/{}", GMAIL_STATUS_ENDPOINT, user_id));

        self.send_json(self.client.get(&url), &url)
            .await
            .context("Failed to check Gmail status")
    }

    pub async fn connect_gmail(&self, user_id: &str) -> Result<GmailConnectResponse> {
        info!("Starting Gmail connection for {}", user_id);
        self.post_json(GMAIL_CONNECT_ENDPOINT, &user_payload(user_id))
            .await
            .context("Failed to start Gmail connection")
    }

    pub async fn disconnect_gmail(&self, user_id: &str) -> Result<BackendAck> {
        info!("Disconnecting Gmail for {}", user_id);
        self.post_json(GMAIL_DISCONNECT_ENDPOINT, &user_payload(user_id))
            .await
            .context("Failed to disconnect Gmail")
    }

    /// 7. Scan the inbox, let the backend extract applications, then store them
    pub async fn scan_emails(&self, user_id: &str) -> Result<ScanSummary> {
        info!("Scanning emails for {}", user_id);

        let scan: EmailScanResponse = self
            .post_json(SCAN_EMAILS_ENDPOINT, &user_payload(user_id))
            .await
            .context("Email scan failed")?;

        let email_count = scan.email_count.max(scan.emails.len());
        if scan.emails.is_empty() {
            return Ok(ScanSummary {
                email_count,
                applications_found: 0,
                applications: Vec::new(),
                message: scan
                    .message
                    .unwrap_or_else(|| "No job-related emails found".to_string()),
            });
        }

        let analysis: EmailAnalysisResponse = match self
            .post_json(
                ANALYZE_EMAILS_ENDPOINT,
                &serde_json::json!({ "emails": scan.emails }),
            )
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                // the scan itself succeeded; report it without extracted applications
                warn!("Email analysis failed for {}: {:#}", user_id, e);
                return Ok(ScanSummary {
                    email_count,
                    applications_found: 0,
                    applications: Vec::new(),
                    message: format!(
                        "{} emails scanned, analysis unavailable",
                        email_count
                    ),
                });
            }
        };

        if !analysis.applications.is_empty() {
            let saved: Result<serde_json::Value> = self
                .post_json(
                    SAVE_APPLICATIONS_ENDPOINT,
                    &serde_json::json!({
                        "applications": analysis.applications,
                        "userId": user_id,
                    }),
                )
                .await;

            if let Err(e) = saved {
                warn!("Failed to save extracted applications for {}: {:#}", user_id, e);
            }
        }

        let applications_found = analysis.total_found.max(analysis.applications.len());
        info!(
            "Scanned {} emails for {}, {} applications found",
            email_count, user_id, applications_found
        );

        Ok(ScanSummary {
            email_count,
            applications_found,
            applications: analysis.applications,
            message: format!(
                "{} emails scanned, {} applications found",
                email_count, applications_found
            ),
        })
    }

    /// 8. Backend-generated recommendations for a user
    pub async fn recommendations(&self, user_email: &str) -> Result<Vec<Recommendation>> {
        let url = self.url(RECOMMENDATIONS_ENDPOINT);
        let request = self.client.get(&url).query(&[("user_email", user_email)]);

        let envelope: BackendEnvelope<RecommendationsPayload> = self
            .send_json(request, &url)
            .await
            .context("Failed to fetch recommendations")?;

        Ok(recommendations_from(envelope))
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        self.send_json(self.client.post(&url).json(payload), &url).await
    }

    async fn send_json<R>(&self, request: RequestBuilder, url: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        trace!("Calling backend: {}", url);

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let response = check_status(response).await?;
        response
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    warn!("Backend error response {}: {}", status, body);

    Err(BackendStatusError { status, body }.into())
}

fn user_payload(user_id: &str) -> serde_json::Value {
    serde_json::json!({ "userId": user_id })
}

fn recommendations_from(envelope: BackendEnvelope<RecommendationsPayload>) -> Vec<Recommendation> {
    let no_applications = envelope
        .message
        .as_deref()
        .is_some_and(|message| message.contains(NO_APPLICATIONS_MARKER));

    if no_applications || envelope.success == Some(false) {
        if let Some(error) = envelope.error {
            warn!("Backend could not build recommendations: {}", error);
        }
        return Vec::new();
    }

    envelope
        .data
        .map(|payload| payload.recommendations)
        .unwrap_or_default()
}
