// src/types/application.rs
//! Job application records as exchanged with the tracking backend

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::utils::non_blank;

// ===== Record identity =====

/// Backend ids are integers for scanned applications and strings for
/// imported ones; both are accepted and echoed back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

/// `null` and missing text fields both become an empty string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ===== Application record =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Lifecycle tag; usually one of [`ApplicationStatus`] but kept open
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stage: String,
    /// Reference date exactly as the backend sent it
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    #[serde(
        default,
        rename = "stageOrder",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage_order: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ApplicationRecord {
    pub fn new(id: impl Into<RecordId>, company: &str, position: &str) -> Self {
        Self {
            id: id.into(),
            company: company.to_string(),
            position: position.to_string(),
            description: None,
            requirements: None,
            location: None,
            status: String::new(),
            stage: String::new(),
            date: String::new(),
            stage_order: None,
            tasks: Vec::new(),
            result: None,
            reason: None,
            application_type: None,
            contact_person: None,
            salary_info: None,
            deadline: None,
            email_id: None,
            email_subject: None,
            email_sender: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_stage(mut self, stage: &str) -> Self {
        self.stage = stage.to_string();
        self
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_requirements(mut self, requirements: &str) -> Self {
        self.requirements = Some(requirements.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Known lifecycle status, `None` for labels outside the usual set
    pub fn lifecycle(&self) -> Option<ApplicationStatus> {
        ApplicationStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Active,
    Pending,
    Finished,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "finished" => Some(Self::Finished),
            "rejected" => Some(Self::Rejected),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }

    /// Still waiting on the employer
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Active | Self::Pending)
    }
}

// ===== Backend listing =====

/// Shape of `GET /applications/{user}` on the tracking backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationsSnapshot {
    #[serde(default)]
    pub active_applications: Vec<ApplicationRecord>,
    #[serde(default)]
    pub finished_applications: Vec<ApplicationRecord>,
    #[serde(default)]
    pub total_active: usize,
    #[serde(default)]
    pub total_finished: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApplicationsSnapshot {
    /// Active records first, then finished ones, each in backend order
    pub fn records(&self) -> Vec<ApplicationRecord> {
        self.active_applications
            .iter()
            .chain(self.finished_applications.iter())
            .cloned()
            .collect()
    }
}

// ===== Manual entry and edits =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualApplication {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default = "default_manual_status")]
    pub application_status: String,
    #[serde(default = "default_application_type")]
    pub application_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
}

fn default_manual_status() -> String {
    "Applied".to_string()
}

fn default_application_type() -> String {
    "job".to_string()
}

impl ManualApplication {
    /// Field-level problems that keep the entry from being submitted
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if non_blank(Some(&self.company_name)).is_none() {
            errors.push("company_name is required".to_string());
        }
        if non_blank(Some(&self.position)).is_none() {
            errors.push("position is required".to_string());
        }
        errors
    }
}

/// Partial edit; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

impl ApplicationUpdate {
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.position.is_none()
            && self.application_status.is_none()
            && self.next_action.is_none()
            && self.deadline.is_none()
            && self.contact_person.is_none()
            && self.salary_info.is_none()
            && self.location.is_none()
            && self.requirements.is_none()
    }
}

/// The email an application was extracted from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationEmail {
    pub application_id: RecordId,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub email_subject: Option<String>,
    #[serde(default)]
    pub email_sender: Option<String>,
    #[serde(default)]
    pub email_date: Option<String>,
    #[serde(default)]
    pub email_content: Option<String>,
    #[serde(default)]
    pub email_body: Option<String>,
    #[serde(default)]
    pub html_body: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tolerates_missing_and_null_fields() {
        let record: ApplicationRecord = serde_json::from_str(
            r#"{"id": 3, "company": null, "position": "Engineer", "location": null}"#,
        )
        .unwrap();

        assert_eq!(record.id, RecordId::Number(3));
        assert_eq!(record.company, "");
        assert_eq!(record.position, "Engineer");
        assert_eq!(record.location, None);
        assert_eq!(record.date, "");
        assert!(record.tasks.is_empty());
    }

    #[test]
    fn test_record_keeps_backend_extras() {
        let record: ApplicationRecord = serde_json::from_str(
            r#"{
                "id": "imp-7",
                "company": "Acme",
                "position": "Backend Engineer",
                "status": "active",
                "stage": "Interview",
                "stageOrder": 3,
                "tasks": ["Prepare system design"],
                "email_subject": "Interview invitation"
            }"#,
        )
        .unwrap();

        assert_eq!(record.id.to_string(), "imp-7");
        assert_eq!(record.stage_order, Some(3));
        assert_eq!(record.tasks, vec!["Prepare system design".to_string()]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["stageOrder"], 3);
        assert!(json.get("salary_info").is_none());
    }

    #[test]
    fn test_application_status_parse() {
        assert_eq!(
            ApplicationStatus::parse("pending"),
            Some(ApplicationStatus::Pending)
        );
        assert_eq!(ApplicationStatus::parse("Pending"), None);
        assert_eq!(ApplicationStatus::parse("ghosted"), None);
        assert!(ApplicationStatus::Active.is_open());
        assert!(!ApplicationStatus::Accepted.is_open());
    }

    #[test]
    fn test_snapshot_records_order() {
        let snapshot: ApplicationsSnapshot = serde_json::from_str(
            r#"{
                "active_applications": [{"id": 1, "company": "Acme"}, {"id": 2, "company": "Globex"}],
                "finished_applications": [{"id": 3, "company": "Initech"}],
                "total_active": 2,
                "total_finished": 1
            }"#,
        )
        .unwrap();

        let ids: Vec<String> = snapshot
            .records()
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_manual_application_defaults_and_validation() {
        let entry: ManualApplication =
            serde_json::from_str(r#"{"company_name": "  ", "position": "Analyst"}"#).unwrap();

        assert_eq!(entry.application_status, "Applied");
        assert_eq!(entry.application_type, "job");
        assert_eq!(entry.validate(), vec!["company_name is required".to_string()]);
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = ApplicationUpdate {
            application_status: Some("Interview".to_string()),
            ..Default::default()
        };

        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"application_status":"Interview"}"#
        );
        assert!(ApplicationUpdate::default().is_empty());
    }
}
