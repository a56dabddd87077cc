//! Wordsprint server binary.
//!
//! Wires Redis, the WhatsApp Cloud API and the expiry worker together and
//! serves the webhook until Ctrl+C or SIGTERM.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use wordsprint::adapters::http::{webhook_router, WebhookAppState};
use wordsprint::adapters::{CloudApiSender, ExpiryWorker, RedisSessionStore, TokioExpiryScheduler};
use wordsprint::application::{ChatDispatcher, SprintEngine};
use wordsprint::config::{AppConfig, ConfigError, LogFormat, ValidationError};
use wordsprint::ports::{MessageSendError, SessionStoreError};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session store unavailable: {0}")]
    Store(#[from] SessionStoreError),

    #[error("Timed out connecting to Redis")]
    StoreTimeout,

    #[error("WhatsApp client setup failed: {0}")]
    Sender(#[from] MessageSendError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "Wordsprint stopped");
        eprintln!("wordsprint: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let addr = config.server.socket_addr()?;

    let store = tokio::time::timeout(
        config.redis.connect_timeout(),
        RedisSessionStore::connect(&config.redis.url),
    )
    .await
    .map_err(|_| StartupError::StoreTimeout)??;
    let sender = CloudApiSender::new(config.whatsapp.cloud_api())?;

    let (scheduler, triggers) = TokioExpiryScheduler::channel();
    let engine = Arc::new(SprintEngine::new(
        Arc::new(store),
        Arc::new(scheduler),
        config.sprint.settings(),
    ));
    let dispatcher = Arc::new(ChatDispatcher::new(engine, Arc::new(sender)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(ExpiryWorker::new(triggers, Arc::clone(&dispatcher)).run(shutdown_rx));

    let mut state = WebhookAppState::new(dispatcher, config.whatsapp.verify_token.clone());
    if let Some(secret) = &config.whatsapp.app_secret {
        state = state.with_app_secret(secret.clone());
    } else {
        tracing::warn!("No app secret configured; webhook signatures are not checked");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Wordsprint listening");

    axum::serve(listener, webhook_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Expiry worker did not stop cleanly");
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// JSON or human-readable logs per `server.log_format`. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.server.log_format == LogFormat::Json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
