use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::{BackendClient, ChatAnswer, WispApiError};

#[derive(Debug, Clone)]
/// Connection settings for the external backend, passed at construction.
pub struct BackendConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// Reqwest-backed implementation of [`BackendClient`].
pub struct HttpBackendClient {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, WispApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}{path}")
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<String, WispApiError> {
        let response = self.client.post(self.endpoint(path)).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WispApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn chat(&self, question: &str) -> Result<ChatAnswer, WispApiError> {
        let form = Form::new().text("question", question.to_string());
        let body = self.post_form("/chat", form).await?;
        parse_chat_answer(&body)
    }

    async fn ingest_url(&self, url: &str) -> Result<(), WispApiError> {
        let form = Form::new().text("url", url.to_string());
        self.post_form("/ingest/url", form).await?;
        Ok(())
    }

    async fn ingest_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), WispApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|error| WispApiError::Malformed(format!("invalid document part: {error}")))?;
        let form = Form::new().part("file", part);
        self.post_form("/ingest/pdf", form).await?;
        Ok(())
    }
}

fn parse_chat_answer(body: &str) -> Result<ChatAnswer, WispApiError> {
    let value: Value = serde_json::from_str(body)?;
    let answer = match value.get("answer").and_then(Value::as_str) {
        Some(answer) => answer.to_string(),
        // The backend reports its own ingestion/RAG failures as 200 bodies
        // without an answer field; treat those as malformed replies.
        None => {
            return Err(WispApiError::Malformed(format!(
                "chat response has no string `answer` field: {body}"
            )))
        }
    };
    let question = value
        .get("question")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ChatAnswer { question, answer })
}
