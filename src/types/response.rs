use serde::{Deserialize, Serialize};

use crate::types::application::RecordId;

// ===== Service Response Types =====

/// Envelope used by the backend search routes
#[derive(Debug, Deserialize)]
pub struct BackendEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GmailStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GmailStatus {
    pub fn disconnected() -> Self {
        Self::default()
    }
}

/// Reply of `POST /gmail/connect`; carries the OAuth consent URL when one is needed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GmailConnectResponse {
    #[serde(default, alias = "authUrl", skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EmailScanResponse {
    #[serde(default)]
    pub emails: Vec<serde_json::Value>,
    #[serde(default, rename = "emailCount")]
    pub email_count: usize,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EmailAnalysisResponse {
    #[serde(default)]
    pub applications: Vec<serde_json::Value>,
    #[serde(default, rename = "totalFound")]
    pub total_found: usize,
}

/// Outcome of the scan -> analyze -> save pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub email_count: usize,
    pub applications_found: usize,
    pub applications: Vec<serde_json::Value>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority_score: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsPayload {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedApplication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<serde_json::Value>,
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendAck {
    #[serde(default)]
    pub message: Option<String>,
}
