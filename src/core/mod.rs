// src/core/mod.rs
//! Shared services used by both the HTTP gateway and the CLI

pub mod service_client;

pub use service_client::{BackendClient, BackendStatusError};
