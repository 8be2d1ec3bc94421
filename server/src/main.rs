//! Account Activity Webhook Server - Main Entry Point

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;

use tw_webhook::{
    api, config,
    config::LogFormat,
    consumer,
    webhooks::{Delivery, IngestState},
};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tw_webhook=debug,tower_http=debug".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;
    init_tracing(config.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %config.webhook_path,
        "Starting Account Activity webhook server"
    );

    // Sink and its default consumer
    let (tx, rx) = mpsc::unbounded_channel::<Delivery>();
    let consumer = tokio::spawn(consumer::run_event_log(rx));

    let ingest = IngestState::new(tx, config.dispatch_timeout())
        .context("Failed to set up webhook ingestion")?;
    let app = api::create_router(&config, ingest);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // The router owned the last sender; the consumer stops once it drains.
    let stats = consumer.await?;
    info!(events = stats.events, errors = stats.errors, "Server shutdown complete");
    Ok(())
}
