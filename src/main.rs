use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use contact_api::api;
use contact_api::config::AppConfig;
use contact_api::context::Context;
use contact_api::global::GlobalState;
use contact_api::logging;
use contact_api::signal::SignalHandler;
use tokio::signal::unix::SignalKind;
use tokio::{select, time};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse()?;
    logging::init(&config.logging.level, config.logging.json)?;

    let (ctx, handler) = Context::new();

    let global = Arc::new(GlobalState::new(config, ctx)?);

    tracing::info!("starting");

    let api_future = tokio::spawn(api::run(global.clone()));

    // Listen on both sigint and sigterm and cancel the context when either is received
    let mut signal_handler =
        SignalHandler::with_signals([SignalKind::interrupt(), SignalKind::terminate()]);

    select! {
        r = api_future => tracing::error!("api stopped unexpectedly: {:?}", r),
        _ = signal_handler.recv() => tracing::info!("shutting down"),
    }

    // We cannot have a context in scope when we cancel the handler, otherwise it will deadlock.
    drop(global);

    tracing::info!("waiting for tasks to finish");

    select! {
        _ = time::sleep(Duration::from_secs(60)) => tracing::warn!("force shutting down"),
        _ = signal_handler.recv() => tracing::warn!("force shutting down"),
        _ = handler.cancel() => tracing::info!("shutdown complete"),
    }

    Ok(())
}
