//! Typed HTTP client for the external chatbot backend.
//!
//! The backend owns ingestion, retrieval, and answer generation; this crate
//! only speaks its multipart API (`/chat`, `/ingest/url`, `/ingest/pdf`) and
//! classifies the ways a call can fail.

mod client;
mod types;

pub use client::{BackendConfig, HttpBackendClient};
pub use types::{
    ApiFailureKind, BackendClient, ChatAnswer, Message, MessageRole, WispApiError,
};
