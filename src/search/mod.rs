// src/search/mod.rs
//! Local search over an in-memory list of application records.
//!
//! The engine is a pure function: it reads a snapshot, never mutates it and
//! keeps the caller's ordering. A free-text query is OR-ed across the text
//! fields of a record, then every populated filter narrows the result further.

pub mod analytics;

pub use analytics::{summarize, SearchAnalytics};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ApplicationRecord;
use crate::utils::{contains_lowercase, field_contains, non_blank, parse_calendar_date};

/// Structured constraints; an absent or blank field is not applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl SearchFilters {
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_stage(mut self, stage: &str) -> Self {
        self.stage = Some(stage.to_string());
        self
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn with_position(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }

    pub fn with_date_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    /// True when no field would constrain a search
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|field| non_blank(*field).is_none())
    }

    /// Copy keeping only populated fields, used to echo what was applied
    pub fn normalized(&self) -> Self {
        let keep = |field: &Option<String>| populated(field).map(str::to_string);

        Self {
            status: keep(&self.status),
            stage: keep(&self.stage),
            company: keep(&self.company),
            position: keep(&self.position),
            start_date: keep(&self.start_date),
            end_date: keep(&self.end_date),
        }
    }

    fn fields(&self) -> [Option<&str>; 6] {
        [
            self.status.as_deref(),
            self.stage.as_deref(),
            self.company.as_deref(),
            self.position.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        ]
    }

    fn start_bound(&self) -> Option<NaiveDate> {
        non_blank(self.start_date.as_deref()).and_then(parse_calendar_date)
    }

    fn end_bound(&self) -> Option<NaiveDate> {
        non_blank(self.end_date.as_deref()).and_then(parse_calendar_date)
    }
}

/// The untrimmed value of a field that carries any text
fn populated(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMetadata {
    pub execution_time: DateTime<Utc>,
    pub total_applications: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    pub results: Vec<&'a ApplicationRecord>,
    pub total: usize,
    pub query: String,
    pub filters: SearchFilters,
    pub search_metadata: SearchMetadata,
}

impl SearchOutcome<'_> {
    /// Owned copy of the matching records
    pub fn to_records(&self) -> Vec<ApplicationRecord> {
        self.results.iter().map(|r| (*r).clone()).collect()
    }
}

/// Select the records matching `query` and `filters`, preserving input order.
pub fn search<'a>(
    records: &'a [ApplicationRecord],
    query: &str,
    filters: &SearchFilters,
) -> SearchOutcome<'a> {
    let query = query.trim();
    let metadata = SearchMetadata {
        execution_time: Utc::now(),
        total_applications: records.len(),
    };

    if query.is_empty() && filters.is_empty() {
        return SearchOutcome {
            results: records.iter().collect(),
            total: records.len(),
            query: String::new(),
            filters: SearchFilters::default(),
            search_metadata: metadata,
        };
    }

    let predicate = Predicate::new(query, filters);
    let results: Vec<&ApplicationRecord> = records
        .iter()
        .filter(|record| predicate.matches(record))
        .collect();

    debug!(
        "Local search '{}' kept {} of {} applications",
        query,
        results.len(),
        records.len()
    );

    SearchOutcome {
        total: results.len(),
        results,
        query: query.to_string(),
        filters: filters.normalized(),
        search_metadata: metadata,
    }
}

/// Query and filters prepared once per search
struct Predicate<'f> {
    query: Option<String>,
    status: Option<&'f str>,
    stage: Option<&'f str>,
    company: Option<String>,
    position: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl<'f> Predicate<'f> {
    fn new(query: &str, filters: &'f SearchFilters) -> Self {
        // filter values are applied as given; only blank values are skipped
        let lower = |field: &Option<String>| populated(field).map(str::to_lowercase);

        Self {
            query: non_blank(Some(query)).map(str::to_lowercase),
            status: populated(&filters.status),
            stage: populated(&filters.stage),
            company: lower(&filters.company),
            position: lower(&filters.position),
            start: filters.start_bound(),
            end: filters.end_bound(),
        }
    }

    fn matches(&self, record: &ApplicationRecord) -> bool {
        self.matches_query(record)
            && self.status.map_or(true, |status| record.status == status)
            && self.stage.map_or(true, |stage| record.stage == stage)
            && self
                .company
                .as_deref()
                .map_or(true, |company| contains_lowercase(&record.company, company))
            && self
                .position
                .as_deref()
                .map_or(true, |position| contains_lowercase(&record.position, position))
            && self.matches_dates(record)
    }

    fn matches_query(&self, record: &ApplicationRecord) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };

        contains_lowercase(&record.company, query)
            || contains_lowercase(&record.position, query)
            || field_contains(record.description.as_deref(), query)
            || field_contains(record.requirements.as_deref(), query)
            || field_contains(record.location.as_deref(), query)
    }

    fn matches_dates(&self, record: &ApplicationRecord) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }

        // records whose date cannot be read never satisfy a date bound
        let Some(date) = parse_calendar_date(&record.date) else {
            return false;
        };

        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}
