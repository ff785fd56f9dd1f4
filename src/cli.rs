// src/cli.rs
use crate::environment::AppConfig;
use crate::search::{search, summarize, SearchFilters, SearchOutcome};
use crate::types::{ApplicationRecord, ApplicationsSnapshot};
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "jobsy")]
#[command(about = "Job application tracker gateway and local search tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP gateway
    Serve,
    /// Search a saved list of applications
    Search {
        /// JSON file holding a record array or a backend listing
        #[arg(long)]
        records: PathBuf,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print dashboard analytics for a saved list of applications
    Analytics {
        #[arg(long)]
        records: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// Both export shapes are accepted: a bare array or the backend listing
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Records(Vec<ApplicationRecord>),
    Snapshot(ApplicationsSnapshot),
}

const CSV_HEADER: [&str; 7] = [
    "id", "company", "position", "status", "stage", "date", "location",
];

pub fn load_records(path: &Path) -> Result<Vec<ApplicationRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let file: RecordsFile = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a record list or listing", path.display()))?;

    Ok(match file {
        RecordsFile::Records(records) => records,
        RecordsFile::Snapshot(snapshot) => snapshot.records(),
    })
}

pub fn write_csv<W: Write>(writer: W, outcome: &SearchOutcome<'_>) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in &outcome.results {
        let id = record.id.to_string();
        csv_writer.write_record([
            id.as_str(),
            record.company.as_str(),
            record.position.as_str(),
            record.status.as_str(),
            record.stage.as_str(),
            record.date.as_str(),
            record.location.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush().context("Failed to write CSV output")?;
    Ok(())
}

/// `config` is loaded up front for `serve` so logging can use its `log_file`
pub async fn handle_command(command: Command, config: Option<AppConfig>) -> Result<()> {
    match command {
        Command::Serve => {
            let config = config.context("No configuration loaded for serve")?;
            start_web_server(config).await
        }

        Command::Search {
            records,
            query,
            status,
            stage,
            company,
            position,
            start_date,
            end_date,
            format,
        } => {
            let loaded = load_records(&records)?;
            let filters = SearchFilters {
                status,
                stage,
                company,
                position,
                start_date,
                end_date,
            };

            let outcome = search(&loaded, &query, &filters);
            info!(
                "Matched {} of {} records from {}",
                outcome.total,
                loaded.len(),
                records.display()
            );

            let stdout = std::io::stdout();
            match format {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(stdout.lock(), &outcome)
                        .context("Failed to write JSON output")?;
                    println!();
                }
                OutputFormat::Csv => write_csv(stdout.lock(), &outcome)?,
            }
            Ok(())
        }

        Command::Analytics { records } => {
            let loaded = load_records(&records)?;
            let analytics = summarize(&loaded);

            serde_json::to_writer_pretty(std::io::stdout().lock(), &analytics)
                .context("Failed to write JSON output")?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bare_record_array() {
        let file = write_temp(
            r#"[{"id": 1, "company": "Acme", "position": "Engineer", "status": "Active",
                 "stage": "Interview", "date": "2024-03-10"}]"#,
        );

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::Number(1));
        assert_eq!(records[0].company, "Acme");
    }

    #[test]
    fn test_load_backend_listing() {
        let file = write_temp(
            r#"{"active_applications": [{"id": 1, "company": "Acme", "position": "Engineer"}],
                "finished_applications": [{"id": 2, "company": "Globex", "position": "Designer"}],
                "total_active": 1, "total_finished": 1}"#,
        );

        let records = load_records(file.path()).unwrap();
        let companies: Vec<&str> = records.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_load_rejects_other_json() {
        let file = write_temp(r#""just a string""#);
        assert!(load_records(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_csv_output() {
        let records = vec![
            ApplicationRecord::new(RecordId::Number(1), "Acme, Inc", "Engineer")
                .with_status("Active")
                .with_location("Berlin"),
            ApplicationRecord::new(RecordId::Number(2), "Globex", "Designer"),
        ];
        let outcome = search(&records, "acme", &SearchFilters::default());

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &outcome).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "id,company,position,status,stage,date,location");
        assert_eq!(lines[1], "1,\"Acme, Inc\",Engineer,Active,,,Berlin");
    }

    #[test]
    fn test_cli_parses_search_flags() {
        let cli = Cli::parse_from([
            "jobsy",
            "search",
            "--records",
            "apps.json",
            "--query",
            "rust",
            "--start-date",
            "2024-01-01",
            "--format",
            "csv",
        ]);

        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        match cli.command {
            Command::Search {
                query,
                start_date,
                format,
                status,
                ..
            } => {
                assert_eq!(query, "rust");
                assert_eq!(start_date.as_deref(), Some("2024-01-01"));
                assert_eq!(format, OutputFormat::Csv);
                assert!(status.is_none());
            }
            _ => panic!("expected search command"),
        }
    }
}
