use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Role of a message inside a widget chat thread.
pub enum MessageRole {
    User,
    Bot,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One exchanged message: role plus plain text content.
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Bot,
            content: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Parsed body of a successful `POST /chat` call.
///
/// Only `answer` is contractual; the backend echoes the question and may stop
/// doing so without notice.
pub struct ChatAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub answer: String,
}

#[derive(Debug, Error)]
/// Classified failure of one backend call.
pub enum WispApiError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned non-success status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    Malformed(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl WispApiError {
    pub fn kind(&self) -> ApiFailureKind {
        match self {
            Self::Transport(_) => ApiFailureKind::Transport,
            Self::Rejected { .. } => ApiFailureKind::Rejected,
            Self::Malformed(_) | Self::Serde(_) => ApiFailureKind::Malformed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Failure classification exposed to presentation and telemetry.
///
/// Call sites never branch on error internals; they branch on the kind, so a
/// retry policy can be layered in later without re-touching them.
pub enum ApiFailureKind {
    Transport,
    Rejected,
    Malformed,
}

impl ApiFailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Rejected => "rejected",
            Self::Malformed => "malformed",
        }
    }
}

#[async_trait]
/// Trait contract for clients of the external chatbot backend.
pub trait BackendClient: Send + Sync {
    /// Submits a question and returns the generated answer.
    async fn chat(&self, question: &str) -> Result<ChatAnswer, WispApiError>;

    /// Asks the backend to fetch and index the page behind `url`.
    async fn ingest_url(&self, url: &str) -> Result<(), WispApiError>;

    /// Uploads a PDF document for indexing.
    async fn ingest_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), WispApiError>;
}
