// src/lib.rs
pub mod cli;
pub mod core;
pub mod environment;
pub mod search;
pub mod types;
pub mod utils;
pub mod web;

pub use crate::core::BackendClient;
pub use environment::AppConfig;
pub use search::{search, summarize, SearchFilters, SearchOutcome};
pub use web::{build_rocket, start_web_server};
