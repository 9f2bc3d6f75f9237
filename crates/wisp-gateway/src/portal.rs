use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Multipart, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use wisp_api::BackendClient;
use wisp_cli::parse_hex_color;
use wisp_console_ui::{
    render_console_shell_with_context, BotConfig, ConsoleShellContext, ConsoleTab, StatusLine,
};
use wisp_session::{ChatRuntime, SendOutcome, SendRejected};

mod embed_script;
mod widget_page;

use embed_script::render_widget_embed_script;
use widget_page::render_widget_page;

const CONSOLE_ENDPOINT: &str = "/console";
const CONSOLE_CONFIG_ENDPOINT: &str = "/console/config";
const CONSOLE_INGEST_URL_ENDPOINT: &str = "/console/ingest/url";
const CONSOLE_INGEST_DOCUMENT_ENDPOINT: &str = "/console/ingest/document";
const WIDGET_ENDPOINT: &str = "/widget";
const WIDGET_SCRIPT_ENDPOINT: &str = "/widget.js";
const WIDGET_MESSAGE_ENDPOINT: &str = "/widget/message";
const WIDGET_TOGGLE_ENDPOINT: &str = "/widget/toggle";
const PORTAL_STATUS_ENDPOINT: &str = "/portal/status";

const STATUS_INGESTING_URL: &str = "Ingesting URL...";
const STATUS_URL_INGESTED: &str = "URL ingested successfully!";
const STATUS_URL_FAILED: &str = "Failed to ingest URL.";
const STATUS_UPLOADING_FILE: &str = "Uploading file...";
const STATUS_FILE_INGESTED: &str = "File uploaded and indexed!";
const STATUS_FILE_FAILED: &str = "Failed to upload file.";
const STATUS_INVALID_COLOR: &str = "Primary color must be in #rrggbb format.";

#[derive(Debug, Clone)]
/// Portal settings assembled once at startup and passed at construction.
pub struct PortalConfig {
    pub bind_addr: String,
    pub public_base_url: String,
    pub bot_config: BotConfig,
}

#[derive(Debug)]
struct ConsoleState {
    status: Option<StatusLine>,
    bot_config: BotConfig,
    last_document: Option<String>,
}

/// Shared state behind every portal route.
///
/// Console state and the widget chat runtime are independent mutexes; neither
/// lock is ever held across a backend call.
pub struct PortalServerState {
    config: PortalConfig,
    backend: Arc<dyn BackendClient>,
    console: Mutex<ConsoleState>,
    chat: Mutex<ChatRuntime>,
}

impl PortalServerState {
    pub fn new(config: PortalConfig, backend: Arc<dyn BackendClient>) -> Self {
        let chat = ChatRuntime::new(config.bot_config.greeting.clone());
        let console = ConsoleState {
            status: None,
            bot_config: config.bot_config.clone(),
            last_document: None,
        };
        Self {
            config,
            backend,
            console: Mutex::new(console),
            chat: Mutex::new(chat),
        }
    }

    fn lock_console(&self) -> std::sync::MutexGuard<'_, ConsoleState> {
        self.console.lock().expect("console state lock poisoned")
    }

    fn lock_chat(&self) -> std::sync::MutexGuard<'_, ChatRuntime> {
        self.chat.lock().expect("chat runtime lock poisoned")
    }
}

/// Binds the configured address and serves the portal until ctrl-c.
pub async fn serve_portal(
    config: PortalConfig,
    backend: Arc<dyn BackendClient>,
) -> Result<()> {
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind portal address {}", config.bind_addr))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve portal listen address")?;
    tracing::info!(%local_addr, "portal server listening");

    let state = Arc::new(PortalServerState::new(config, backend));
    let app = build_portal_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("portal server exited unexpectedly")
}

pub fn build_portal_router(state: Arc<PortalServerState>) -> Router {
    Router::new()
        .route(CONSOLE_ENDPOINT, get(handle_console_page))
        .route(CONSOLE_CONFIG_ENDPOINT, post(handle_console_config))
        .route(CONSOLE_INGEST_URL_ENDPOINT, post(handle_console_ingest_url))
        .route(
            CONSOLE_INGEST_DOCUMENT_ENDPOINT,
            post(handle_console_ingest_document),
        )
        .route(WIDGET_ENDPOINT, get(handle_widget_page))
        .route(WIDGET_SCRIPT_ENDPOINT, get(handle_widget_script))
        .route(WIDGET_MESSAGE_ENDPOINT, post(handle_widget_message))
        .route(WIDGET_TOGGLE_ENDPOINT, post(handle_widget_toggle))
        .route(PORTAL_STATUS_ENDPOINT, get(handle_portal_status))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ConsolePageQuery {
    tab: Option<String>,
    copied: Option<String>,
}

async fn handle_console_page(
    State(state): State<Arc<PortalServerState>>,
    Query(query): Query<ConsolePageQuery>,
) -> Html<String> {
    let active_tab = ConsoleTab::from_query_token(query.tab.as_deref());
    let snippet_copied = query.copied.as_deref() == Some("true");

    let console = state.lock_console();
    let context = ConsoleShellContext {
        active_tab,
        status: console.status.clone(),
        bot_config: console.bot_config.clone(),
        last_document: console.last_document.clone(),
        public_base_url: state.config.public_base_url.clone(),
        snippet_copied,
    };
    drop(console);

    Html(render_console_shell_with_context(context))
}

#[derive(Debug, Deserialize)]
struct BotConfigForm {
    bot_name: String,
    greeting: String,
    primary_color: String,
}

async fn handle_console_config(
    State(state): State<Arc<PortalServerState>>,
    Form(form): Form<BotConfigForm>,
) -> Redirect {
    let mut console = state.lock_console();
    match parse_hex_color(&form.primary_color) {
        Ok(color) => {
            console.bot_config = BotConfig {
                name: form.bot_name.trim().to_string(),
                greeting: form.greeting.trim().to_string(),
                primary_color: color,
            };
            // Appearance updates are quiet; the preview is the feedback.
            console.status = None;
        }
        Err(reason) => {
            tracing::warn!(%reason, "rejected bot config update");
            console.status = Some(StatusLine::error(STATUS_INVALID_COLOR));
        }
    }
    drop(console);

    Redirect::to(&tab_href(ConsoleTab::BotConfig))
}

#[derive(Debug, Deserialize)]
struct IngestUrlForm {
    url: String,
}

async fn handle_console_ingest_url(
    State(state): State<Arc<PortalServerState>>,
    Form(form): Form<IngestUrlForm>,
) -> Redirect {
    let url = form.url.trim().to_string();
    if url.is_empty() {
        // Matches the inert button: nothing happens without a URL.
        return Redirect::to(&tab_href(ConsoleTab::Knowledge));
    }

    state.lock_console().status = Some(StatusLine::info(STATUS_INGESTING_URL));

    let result = state.backend.ingest_url(&url).await;

    let mut console = state.lock_console();
    match result {
        Ok(()) => {
            tracing::info!(%url, "url ingested");
            console.status = Some(StatusLine::success(STATUS_URL_INGESTED));
        }
        Err(error) => {
            tracing::warn!(failure_kind = error.kind().as_str(), %error, "url ingestion failed");
            console.status = Some(StatusLine::error(STATUS_URL_FAILED));
        }
    }
    drop(console);

    Redirect::to(&tab_href(ConsoleTab::Knowledge))
}

async fn handle_console_ingest_document(
    State(state): State<Arc<PortalServerState>>,
    mut multipart: Multipart,
) -> Redirect {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        // Browsers submit an empty file part when nothing was selected.
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        if let Ok(bytes) = field.bytes().await {
            if !bytes.is_empty() {
                upload = Some((file_name, bytes.to_vec()));
            }
        }
    }

    let Some((file_name, bytes)) = upload else {
        // No document selected: the action stays inert, no request is made.
        return Redirect::to(&tab_href(ConsoleTab::Knowledge));
    };

    {
        let mut console = state.lock_console();
        console.status = Some(StatusLine::info(STATUS_UPLOADING_FILE));
        console.last_document = Some(file_name.clone());
    }

    let result = state.backend.ingest_document(&file_name, bytes).await;

    let mut console = state.lock_console();
    match result {
        Ok(()) => {
            tracing::info!(%file_name, "document ingested");
            console.status = Some(StatusLine::success(STATUS_FILE_INGESTED));
            console.last_document = None;
        }
        Err(error) => {
            tracing::warn!(
                failure_kind = error.kind().as_str(),
                %error,
                "document ingestion failed"
            );
            console.status = Some(StatusLine::error(STATUS_FILE_FAILED));
        }
    }
    drop(console);

    Redirect::to(&tab_href(ConsoleTab::Knowledge))
}

async fn handle_widget_page(State(state): State<Arc<PortalServerState>>) -> Html<String> {
    let bot_config = state.lock_console().bot_config.clone();
    let chat = state.lock_chat();
    Html(render_widget_page(&bot_config, &chat))
}

async fn handle_widget_script(State(state): State<Arc<PortalServerState>>) -> Response {
    (
        [(axum::http::header::CONTENT_TYPE, "application/javascript")],
        render_widget_embed_script(&state.config.public_base_url),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct WidgetMessageForm {
    message: String,
}

async fn handle_widget_message(
    State(state): State<Arc<PortalServerState>>,
    Form(form): Form<WidgetMessageForm>,
) -> Json<serde_json::Value> {
    // Take the send slot without holding the lock across the backend await.
    let question = match state.lock_chat().begin_send(&form.message) {
        Ok(question) => question,
        Err(SendRejected::EmptyInput) => {
            return Json(json!({ "outcome": "ignored" }));
        }
        Err(SendRejected::RequestInFlight) => {
            return Json(json!({ "outcome": "busy" }));
        }
    };

    let result = state.backend.chat(&question).await;

    let mut chat = state.lock_chat();
    let outcome = chat.complete_send(result);
    let reply = chat
        .thread()
        .messages()
        .last()
        .map(|message| message.content.clone())
        .unwrap_or_default();
    drop(chat);

    let outcome_token = match outcome {
        SendOutcome::Answered => "answered",
        SendOutcome::Fallback(_) => "fallback",
    };
    Json(json!({ "outcome": outcome_token, "reply": reply }))
}

async fn handle_widget_toggle(State(state): State<Arc<PortalServerState>>) -> Json<serde_json::Value> {
    let panel = state.lock_chat().toggle_panel();
    Json(json!({ "panel": panel.as_str() }))
}

async fn handle_portal_status(State(state): State<Arc<PortalServerState>>) -> Json<serde_json::Value> {
    let console = state.lock_console();
    let status = console
        .status
        .as_ref()
        .map(|status| json!({ "kind": status.kind.as_str(), "message": status.message }));
    let bot_config = console.bot_config.clone();
    drop(console);

    let chat = state.lock_chat();
    let thread_len = chat.thread().len();
    let panel = chat.panel().as_str();
    let slot = chat.slot().as_str();
    drop(chat);

    Json(json!({
        "portal": {
            "console_endpoint": CONSOLE_ENDPOINT,
            "widget_endpoint": WIDGET_ENDPOINT,
            "widget_script_endpoint": WIDGET_SCRIPT_ENDPOINT,
            "widget_message_endpoint": WIDGET_MESSAGE_ENDPOINT,
            "status_endpoint": PORTAL_STATUS_ENDPOINT,
            "public_base_url": state.config.public_base_url,
        },
        "bot": {
            "name": bot_config.name,
            "greeting": bot_config.greeting,
            "primary_color": bot_config.primary_color,
        },
        "widget": {
            "thread_len": thread_len,
            "panel": panel,
            "send_slot": slot,
        },
        "console": {
            "status": status,
        },
    }))
}

fn tab_href(tab: ConsoleTab) -> String {
    format!("{CONSOLE_ENDPOINT}?tab={}", tab.as_str())
}
