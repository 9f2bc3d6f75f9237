use clap::Parser;

use crate::validation::{parse_hex_color, parse_positive_u64};
use wisp_session::{DEFAULT_BOT_NAME, DEFAULT_GREETING, DEFAULT_PRIMARY_COLOR};

#[derive(Debug, Parser)]
#[command(
    name = "wisp",
    about = "Portal server hosting the chatbot admin console and embeddable widget",
    version
)]
/// Flags and environment bindings for the portal binary.
pub struct Cli {
    #[arg(
        long,
        env = "WISP_BIND",
        default_value = "127.0.0.1:8090",
        help = "Address the portal server listens on"
    )]
    pub bind: String,

    #[arg(
        long = "api-base",
        env = "WISP_API_BASE",
        default_value = "http://localhost:8000",
        help = "Base URL of the chatbot backend API (chat and ingestion endpoints)"
    )]
    pub api_base: String,

    #[arg(
        long = "public-base-url",
        env = "WISP_PUBLIC_BASE_URL",
        help = "Public URL third-party pages reach the portal at; defaults to http://<bind>"
    )]
    pub public_base_url: Option<String>,

    #[arg(
        long = "request-timeout-ms",
        env = "WISP_REQUEST_TIMEOUT_MS",
        default_value = "30000",
        value_parser = parse_positive_u64,
        help = "Timeout for one backend HTTP call, in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "bot-name",
        env = "WISP_BOT_NAME",
        default_value = DEFAULT_BOT_NAME,
        help = "Initial bot display name shown in the widget header and preview"
    )]
    pub bot_name: String,

    #[arg(
        long,
        env = "WISP_GREETING",
        default_value = DEFAULT_GREETING,
        help = "Initial greeting seeded as the first bot message of the widget thread"
    )]
    pub greeting: String,

    #[arg(
        long = "primary-color",
        env = "WISP_PRIMARY_COLOR",
        default_value = DEFAULT_PRIMARY_COLOR,
        value_parser = parse_hex_color,
        help = "Initial widget accent color in #rrggbb format"
    )]
    pub primary_color: String,
}

impl Cli {
    /// Public URL the embed snippet and loader point at.
    pub fn resolved_public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}", self.bind),
        }
    }
}
