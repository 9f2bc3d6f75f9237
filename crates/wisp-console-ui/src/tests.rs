//! Rendered-markup assertions for the console shell.
use super::{
    build_embed_snippet, render_console_shell, render_console_shell_with_context, BotConfig,
    ConsoleShellContext, ConsoleTab, StatusLine,
};
use wisp_session::{DEFAULT_BOT_NAME, DEFAULT_GREETING, DEFAULT_PRIMARY_COLOR};

#[test]
fn functional_render_shell_includes_foundation_markers() {
    let html = render_console_shell();
    assert!(html.contains("id=\"wisp-console-shell\""));
    assert!(html.contains("id=\"wisp-console-sidebar\""));
    assert!(html.contains("id=\"wisp-console-main\""));
    assert!(html.contains("id=\"wisp-console-preview\""));
    assert!(html.contains("data-active-tab=\"knowledge\""));
}

#[test]
fn functional_sidebar_renders_all_three_tab_links() {
    let html = render_console_shell();
    assert_eq!(html.matches("data-nav-item=").count(), 3);
    assert!(html.contains("href=\"/console?tab=knowledge\""));
    assert!(html.contains("href=\"/console?tab=bot-config\""));
    assert!(html.contains("href=\"/console?tab=integration\""));
}

#[test]
fn functional_knowledge_panel_renders_upload_and_url_forms() {
    let html = render_console_shell();
    assert!(html.contains("action=\"/console/ingest/document\""));
    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(html.contains("accept=\".pdf\""));
    assert!(html.contains("Maximum size 10MB"));
    assert!(html.contains("Click to select a PDF file"));
    assert!(html.contains("action=\"/console/ingest/url\""));
    assert!(html.contains("placeholder=\"https://example.com/faq\""));
    assert!(html.contains("Ingest Document"));
    assert!(html.contains("Fetch Content"));
}

#[test]
fn functional_config_panel_echoes_current_bot_config() {
    let html = render_console_shell_with_context(ConsoleShellContext {
        active_tab: ConsoleTab::BotConfig,
        bot_config: BotConfig {
            name: "Support Bee".to_string(),
            greeting: "Buzz! Ask me anything.".to_string(),
            primary_color: "#22aa55".to_string(),
        },
        ..ConsoleShellContext::default()
    });
    assert!(html.contains("data-active-tab=\"bot-config\""));
    assert!(html.contains("value=\"Support Bee\""));
    assert!(html.contains("Buzz! Ask me anything."));
    assert!(html.contains("value=\"#22aa55\""));
    assert!(html.contains("name=\"bot_name\""));
    assert!(html.contains("name=\"greeting\""));
    assert!(html.contains("name=\"primary_color\""));
}

#[test]
fn functional_status_banner_carries_kind_attribute() {
    let html = render_console_shell_with_context(ConsoleShellContext {
        status: Some(StatusLine::error("Failed to ingest URL.")),
        ..ConsoleShellContext::default()
    });
    assert!(html.contains("id=\"wisp-console-status\""));
    assert!(html.contains("data-status-kind=\"error\""));
    assert!(html.contains("Failed to ingest URL."));
}

#[test]
fn regression_no_status_renders_no_banner() {
    let html = render_console_shell();
    assert!(!html.contains("id=\"wisp-console-status\""));
}

#[test]
fn functional_integration_panel_renders_embed_snippet() {
    let html = render_console_shell_with_context(ConsoleShellContext {
        active_tab: ConsoleTab::Integration,
        public_base_url: "https://bots.example.com".to_string(),
        ..ConsoleShellContext::default()
    });
    assert!(html.contains("id=\"wisp-console-snippet\""));
    assert!(html.contains("https://bots.example.com/widget.js"));
    assert!(html.contains("data-snippet-copied=\"false\""));
    assert!(!html.contains("Copied"));
}

#[test]
fn functional_copied_marker_switches_copy_affordance() {
    let html = render_console_shell_with_context(ConsoleShellContext {
        active_tab: ConsoleTab::Integration,
        snippet_copied: true,
        ..ConsoleShellContext::default()
    });
    assert!(html.contains("data-snippet-copied=\"true\""));
    assert!(html.contains("Copied"));
}

#[test]
fn functional_preview_reflects_configured_color_and_texts() {
    let html = render_console_shell_with_context(ConsoleShellContext {
        active_tab: ConsoleTab::BotConfig,
        bot_config: BotConfig {
            name: "Helpdesk".to_string(),
            greeting: "Hi, how can we help?".to_string(),
            primary_color: "#ff7700".to_string(),
        },
        ..ConsoleShellContext::default()
    });
    assert!(html.contains("data-preview-color=\"#ff7700\""));
    assert!(html.contains("background-color: #ff7700;"));
    assert!(html.contains("id=\"wisp-console-preview-name\""));
    assert!(html.contains("Helpdesk"));
    assert!(html.contains("Hi, how can we help?"));
}

#[test]
fn regression_preview_panel_opens_only_on_config_tab() {
    let config_html = render_console_shell_with_context(ConsoleShellContext {
        active_tab: ConsoleTab::BotConfig,
        ..ConsoleShellContext::default()
    });
    assert!(config_html.contains("data-preview-open=\"true\""));

    let knowledge_html = render_console_shell();
    assert!(knowledge_html.contains("data-preview-open=\"false\""));
}

#[test]
fn unit_tab_parsing_defaults_to_knowledge() {
    assert_eq!(ConsoleTab::from_query_token(None), ConsoleTab::Knowledge);
    assert_eq!(
        ConsoleTab::from_query_token(Some("bot-config")),
        ConsoleTab::BotConfig
    );
    assert_eq!(
        ConsoleTab::from_query_token(Some("integration")),
        ConsoleTab::Integration
    );
    assert_eq!(
        ConsoleTab::from_query_token(Some("unknown")),
        ConsoleTab::Knowledge
    );
}

#[test]
fn unit_embed_snippet_normalizes_trailing_slash() {
    assert_eq!(
        build_embed_snippet("http://localhost:8090/"),
        "<script src=\"http://localhost:8090/widget.js\"></script>"
    );
}

#[test]
fn unit_default_bot_config_matches_product_defaults() {
    let config = BotConfig::default();
    assert_eq!(config.name, DEFAULT_BOT_NAME);
    assert_eq!(config.greeting, DEFAULT_GREETING);
    assert_eq!(config.primary_color, DEFAULT_PRIMARY_COLOR);
}
