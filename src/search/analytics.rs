// src/search/analytics.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{ApplicationRecord, ApplicationStatus};

const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct SearchAnalytics {
    pub total_applications: usize,
    pub active_applications: usize,
    pub finished_applications: usize,
    /// Percentage of finished applications that were accepted
    pub success_rate: f64,
    pub stage_distribution: BTreeMap<String, usize>,
    pub company_distribution: BTreeMap<String, usize>,
    pub last_updated: DateTime<Utc>,
}

/// Dashboard counters over a record snapshot
pub fn summarize(records: &[ApplicationRecord]) -> SearchAnalytics {
    let mut active = 0;
    let mut finished = 0;
    let mut accepted = 0;
    let mut stage_distribution = BTreeMap::new();
    let mut company_distribution = BTreeMap::new();

    for record in records {
        match record.lifecycle() {
            Some(status) if status.is_open() => active += 1,
            Some(status) => {
                finished += 1;
                if status == ApplicationStatus::Accepted {
                    accepted += 1;
                }
            }
            None => {}
        }

        *stage_distribution
            .entry(label(&record.stage))
            .or_insert(0) += 1;
        *company_distribution
            .entry(label(&record.company))
            .or_insert(0) += 1;
    }

    let success_rate = if finished > 0 {
        round_two(accepted as f64 / finished as f64 * 100.0)
    } else {
        0.0
    };

    SearchAnalytics {
        total_applications: records.len(),
        active_applications: active,
        finished_applications: finished,
        success_rate,
        stage_distribution,
        company_distribution,
        last_updated: Utc::now(),
    }
}

fn label(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        value.to_string()
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
