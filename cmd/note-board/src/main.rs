//! # note-board binary
//!
//! The entry point that assembles the application from its adapters.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState};
use auth_adapters::{Argon2HashCheck, SharedSecretCheck};
use configs::{AdminSecret, AppConfig, LogConfig, LogFormat};
use domains::ports::AuthenticationCheck;
use services::{EntryService, ModerationService};
use storage_adapters::JsonFileEntryRepository;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configs::load().context("loading configuration")?;
    init_tracing(&config.log);
    if let Some(path) = &config.env_file {
        debug!(path = %path.display(), "loaded .env");
    }

    // 1. Storage
    let repo = Arc::new(JsonFileEntryRepository::new(&config.storage.data_file));
    info!(path = %repo.path().display(), "using entry store");

    // 2. Admin credential check
    let auth = admin_check(&config)?;

    // 3. Services and HTTP state
    let state = AppState::new(
        Arc::new(EntryService::new(repo.clone())),
        Arc::new(ModerationService::new(repo, auth)),
    );

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("binding {}:{}", config.server.host, config.server.port))?;
    info!(addr = %listener.local_addr()?, "note-board listening");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("note-board stopped");
    Ok(())
}

fn admin_check(config: &AppConfig) -> anyhow::Result<Arc<dyn AuthenticationCheck>> {
    let check: Arc<dyn AuthenticationCheck> = match config.admin.secret()? {
        AdminSecret::Plain(password) => Arc::new(SharedSecretCheck::new(password)?),
        AdminSecret::Argon2Hash(hash) => Arc::new(Argon2HashCheck::new(hash)?),
    };
    Ok(check)
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
    }
}
