mod ai;
mod candidates;
mod config;
mod credentials;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod notice;
mod proxy;
mod routes;
mod session;
mod settings;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::Backends;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::llm_client::{CompletionSettings, DEFAULT_TEMPERATURE};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::AirtableClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HR Insights API v{}", env!("CARGO_PKG_VERSION"));

    // Shared HTTP client for Airtable, file downloads and completions
    let http = reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    let airtable = AirtableClient::new(
        http.clone(),
        &config.airtable_api_url,
        &config.airtable_base_id,
        &config.airtable_api_key,
    );
    info!("Airtable client initialized (base: {})", config.airtable_base_id);

    let credentials = CredentialStore::load(config.credential_file.clone())
        .await
        .context("Failed to open credential store")?;

    let completion = CompletionSettings {
        api_url: config.openai_api_url.clone(),
        model: config.openai_model.clone(),
        temperature: DEFAULT_TEMPERATURE,
    };
    info!(
        "Completion settings: model {} (server key configured: {})",
        completion.model,
        config.openai_api_key.is_some()
    );

    let ai_provider = Backends::new(http, completion, config.openai_api_key.clone());

    // Build app state
    let state = AppState {
        config: config.clone(),
        store: Arc::new(airtable.clone()),
        airtable,
        credentials,
        ai_provider: Arc::new(ai_provider),
    };

    // Build router (tracing and CORS layers included)
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
