//! ipwatch - emails you when your external IP address changes.
//!
//! Each invocation performs one check and exits; schedule it with cron or a
//! systemd timer. Paths and the lookup service come from `IPWATCH_*`
//! environment variables (a `.env` file is honoured), see `Settings`.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ipwatch_core::{
    compose_notification, evaluate_and_update, ActionOutcome, AddressCache, AddressClient, Config,
    Mailer, Settings,
};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Evaluate `address` against the cache and notify if needed.
///
/// The mail config is only read when a notification is due. Delivery
/// failures are logged by the mailer and do not fail the cycle.
async fn run_cycle(address: &str, settings: &Settings) -> Result<ActionOutcome> {
    let cache = AddressCache::new(&settings.cache_path);
    let outcome = evaluate_and_update(address, &cache)?;
    info!(address = %address, outcome = ?outcome, "Checked external address");

    if !outcome.requires_notification() {
        return Ok(outcome);
    }

    let config = Config::load(&settings.config_path)?;
    if let Some(notification) = compose_notification(address, outcome, &config) {
        Mailer::new(&config).deliver(&notification).await;
    }

    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let settings = Settings::from_env();

    let client = AddressClient::new(&settings.lookup_url)?;
    let address = client.fetch_external_address().await?;

    run_cycle(&address, &settings).await?;
    Ok(())
}
