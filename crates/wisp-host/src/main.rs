//! Portal binary: parses flags, builds the backend client, serves the portal.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use wisp_api::{BackendConfig, HttpBackendClient};
use wisp_cli::Cli;
use wisp_console_ui::BotConfig;
use wisp_gateway::{serve_portal, PortalConfig};

mod bootstrap_helpers;

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap_helpers::init_tracing();
    let cli = Cli::parse();

    let backend = HttpBackendClient::new(BackendConfig {
        api_base: cli.api_base.clone(),
        request_timeout_ms: cli.request_timeout_ms,
    })
    .context("failed to build backend client")?;
    tracing::info!(api_base = %cli.api_base, "backend client ready");

    let config = PortalConfig {
        bind_addr: cli.bind.clone(),
        public_base_url: cli.resolved_public_base_url(),
        bot_config: BotConfig {
            name: cli.bot_name.clone(),
            greeting: cli.greeting.clone(),
            primary_color: cli.primary_color.clone(),
        },
    };

    serve_portal(config, Arc::new(backend)).await
}
