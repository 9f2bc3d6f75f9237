//! Leptos SSR shell for the Wisp operator console.
//!
//! Rendering is a pure function of [`ConsoleShellContext`]; handlers build a
//! context from server state and serve the returned HTML string. Every
//! functional element carries a stable id or `data-` attribute so behavior is
//! assertable from the rendered markup.

use leptos::prelude::*;
use wisp_session::{DEFAULT_BOT_NAME, DEFAULT_GREETING, DEFAULT_PRIMARY_COLOR};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Active console tab, carried in the `tab` query parameter.
pub enum ConsoleTab {
    Knowledge,
    BotConfig,
    Integration,
}

impl ConsoleTab {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::BotConfig => "bot-config",
            Self::Integration => "integration",
        }
    }

    /// Parses the `tab` query value; anything unknown lands on the default
    /// knowledge tab.
    pub fn from_query_token(token: Option<&str>) -> Self {
        match token {
            Some("bot-config") => Self::BotConfig,
            Some("integration") => Self::Integration,
            _ => Self::Knowledge,
        }
    }

    pub fn shell_href(self) -> String {
        format!("/console?tab={}", self.as_str())
    }

    fn nav_label(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge Base",
            Self::BotConfig => "Bot Config",
            Self::Integration => "Integration",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge Base",
            Self::BotConfig => "Customize Chatbot",
            Self::Integration => "Embed Script",
        }
    }

    fn subheading(self) -> &'static str {
        match self {
            Self::Knowledge => "Add sources of information for your AI assistant.",
            Self::BotConfig => "Modify how your chatbot looks and behaves.",
            Self::Integration => "Copy the script tag to add the bot to your website.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Severity of the transient status banner.
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The single status line shown above the active panel.
///
/// Each console action overwrites it; nothing queues or stacks.
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Operator-editable bot appearance. Drives the preview pane and the served
/// widget header; never transmitted to the backend.
pub struct BotConfig {
    pub name: String,
    pub greeting: String,
    pub primary_color: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Everything the console shell render needs.
pub struct ConsoleShellContext {
    pub active_tab: ConsoleTab,
    pub status: Option<StatusLine>,
    pub bot_config: BotConfig,
    pub last_document: Option<String>,
    pub public_base_url: String,
    pub snippet_copied: bool,
}

impl Default for ConsoleShellContext {
    fn default() -> Self {
        Self {
            active_tab: ConsoleTab::Knowledge,
            status: None,
            bot_config: BotConfig::default(),
            last_document: None,
            public_base_url: "http://localhost:8090".to_string(),
            snippet_copied: false,
        }
    }
}

/// Script tag a third-party page pastes before `</body>`.
pub fn build_embed_snippet(public_base_url: &str) -> String {
    let base = public_base_url.trim_end_matches('/');
    format!("<script src=\"{base}/widget.js\"></script>")
}

fn hidden_attr(visible: bool) -> &'static str {
    if visible {
        "false"
    } else {
        "true"
    }
}

/// Renders the full console page for the given context.
pub fn render_console_shell_with_context(context: ConsoleShellContext) -> String {
    let active_tab = context.active_tab;
    let active_tab_attr = active_tab.as_str();
    let heading = active_tab.heading();
    let subheading = active_tab.subheading();

    let knowledge_hidden = hidden_attr(active_tab == ConsoleTab::Knowledge);
    let config_hidden = hidden_attr(active_tab == ConsoleTab::BotConfig);
    let integration_hidden = hidden_attr(active_tab == ConsoleTab::Integration);

    let status_banner = context.status.as_ref().map(|status| {
        let kind_attr = status.kind.as_str();
        let message = status.message.clone();
        view! {
            <div id="wisp-console-status" role="status" data-status-kind=kind_attr>
                {message}
            </div>
        }
    });

    let nav_items = [ConsoleTab::Knowledge, ConsoleTab::BotConfig, ConsoleTab::Integration]
        .into_iter()
        .map(|tab| {
            let current = if tab == active_tab { "page" } else { "false" };
            view! {
                <li>
                    <a data-nav-item=tab.as_str() aria-current=current href=tab.shell_href()>
                        {tab.nav_label()}
                    </a>
                </li>
            }
        })
        .collect_view();

    let document_label = context
        .last_document
        .clone()
        .unwrap_or_else(|| "Click to select a PDF file".to_string());

    let bot_name = context.bot_config.name.clone();
    let greeting = context.bot_config.greeting.clone();
    let primary_color = context.bot_config.primary_color.clone();
    let accent_style = format!("background-color: {primary_color};");
    let preview_bubble_style = accent_style.clone();
    let preview_header_style = accent_style.clone();
    let preview_user_style = accent_style;
    let preview_color_attr = primary_color.clone();
    let preview_bot_name = bot_name.clone();
    let preview_greeting = greeting.clone();

    let embed_snippet = build_embed_snippet(&context.public_base_url);
    let copied_attr = if context.snippet_copied { "true" } else { "false" };
    let copy_label = if context.snippet_copied { "Copied" } else { "Copy" };
    let copy_href = "/console?tab=integration&copied=true";

    // The opened-panel mockup only shows while the operator edits appearance.
    let preview_open = active_tab == ConsoleTab::BotConfig;
    let preview_open_attr = if preview_open { "true" } else { "false" };
    let preview_panel_hidden = hidden_attr(preview_open);

    let shell = view! {
        <div id="wisp-console-shell" data-app="wisp-console" data-active-tab=active_tab_attr>
            <aside id="wisp-console-sidebar">
                <header id="wisp-console-brand">
                    <h1>Chatbot Admin</h1>
                </header>
                <nav aria-label="Console sections">
                    <ul>{nav_items}</ul>
                </nav>
            </aside>
            <main id="wisp-console-main">
                <header id="wisp-console-heading">
                    <h2>{heading}</h2>
                    <p>{subheading}</p>
                </header>
                {status_banner}
                <section
                    id="wisp-console-knowledge"
                    data-tab-panel="knowledge"
                    aria-hidden=knowledge_hidden
                >
                    <section id="wisp-console-upload" data-component="DocumentUpload">
                        <h3>"Upload Document (PDF)"</h3>
                        <form
                            id="wisp-console-upload-form"
                            method="post"
                            action="/console/ingest/document"
                            enctype="multipart/form-data"
                        >
                            <div id="wisp-console-dropzone">
                                <label for="wisp-console-file-input">
                                    <p id="wisp-console-file-label">{document_label}</p>
                                    <p id="wisp-console-file-hint">"Maximum size 10MB"</p>
                                </label>
                                <input
                                    id="wisp-console-file-input"
                                    name="file"
                                    type="file"
                                    accept=".pdf"
                                />
                            </div>
                            <button id="wisp-console-upload-submit" type="submit">
                                "Ingest Document"
                            </button>
                        </form>
                    </section>
                    <section id="wisp-console-url" data-component="UrlIngest">
                        <h3>"Fetch from URL"</h3>
                        <form id="wisp-console-url-form" method="post" action="/console/ingest/url">
                            <input
                                id="wisp-console-url-input"
                                name="url"
                                type="text"
                                placeholder="https://example.com/faq"
                            />
                            <button id="wisp-console-url-submit" type="submit">
                                "Fetch Content"
                            </button>
                        </form>
                    </section>
                </section>
                <section
                    id="wisp-console-config"
                    data-tab-panel="bot-config"
                    aria-hidden=config_hidden
                >
                    <form id="wisp-console-config-form" method="post" action="/console/config">
                        <label for="wisp-console-config-name">"Bot Name"</label>
                        <input
                            id="wisp-console-config-name"
                            name="bot_name"
                            type="text"
                            value=bot_name
                        />
                        <label for="wisp-console-config-greeting">"Greeting Message"</label>
                        <textarea id="wisp-console-config-greeting" name="greeting" rows="3">
                            {greeting}
                        </textarea>
                        <label for="wisp-console-config-color">"Primary Color"</label>
                        <input
                            id="wisp-console-config-color"
                            name="primary_color"
                            type="color"
                            value=primary_color
                        />
                        <button id="wisp-console-config-submit" type="submit">
                            "Apply Changes"
                        </button>
                    </form>
                </section>
                <section
                    id="wisp-console-integration"
                    data-tab-panel="integration"
                    aria-hidden=integration_hidden
                >
                    <p>
                        "Paste this script tag before the closing "
                        <code>"</body>"</code>
                        " tag of your website."
                    </p>
                    <div id="wisp-console-snippet" data-snippet-copied=copied_attr>
                        <code id="wisp-console-snippet-code">{embed_snippet}</code>
                        <a id="wisp-console-snippet-copy" href=copy_href>
                            {copy_label}
                        </a>
                    </div>
                </section>
            </main>
            <aside id="wisp-console-preview" data-component="WidgetPreview" data-preview-color=preview_color_attr>
                <h3>"Live Preview"</h3>
                <div id="wisp-console-preview-frame">
                    <div id="wisp-console-preview-mockup" aria-hidden="true">
                        <div class="mock-bar mock-bar-short"></div>
                        <div class="mock-bar mock-bar-wide"></div>
                        <div class="mock-line"></div>
                        <div class="mock-line mock-line-short"></div>
                    </div>
                    <div id="wisp-console-preview-bubble" style=preview_bubble_style></div>
                    <div
                        id="wisp-console-preview-panel"
                        data-preview-open=preview_open_attr
                        aria-hidden=preview_panel_hidden
                    >
                        <header id="wisp-console-preview-header" style=preview_header_style>
                            <span id="wisp-console-preview-name">{preview_bot_name}</span>
                        </header>
                        <div id="wisp-console-preview-thread">
                            <p id="wisp-console-preview-greeting">{preview_greeting}</p>
                            <p id="wisp-console-preview-user" style=preview_user_style>
                                "How can I help you?"
                            </p>
                        </div>
                    </div>
                </div>
            </aside>
        </div>
    };
    shell.to_html()
}

/// Renders the console with default state, used for the bare `/console` hit.
pub fn render_console_shell() -> String {
    render_console_shell_with_context(ConsoleShellContext::default())
}
