//! Telegram Password Bot - Main entry point.

use anyhow::Context;
use credential_store::{CredentialStore, MemoryCredentialStore, PasswordService, PgCredentialStore};
use password_bot::config::{Config, DatabaseConfig, LogFormat};
use password_bot::{AppResult, LogCodeDelivery, SessionRouter};
use secrecy::ExposeSecret;
use session_store::{SessionConfig, SessionStore, VerificationPolicy};
use std::sync::Arc;
use std::time::Duration;
use telegram_client::{MessageReceiver, TelegramClient};
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level, config.log.format);

    info!("Starting Telegram Password Bot...");

    // Initialize storage
    let store = open_store(&config.database).await?;
    let service = Arc::new(PasswordService::new(store));

    if service.health_check().await {
        info!("Credential store healthy");
    } else {
        warn!("Credential store health check failed - will retry on requests");
    }

    let sessions = SessionStore::new(SessionConfig::from(&config.session));

    // Request timeout must outlast the long poll.
    let telegram = TelegramClient::new(
        &config.telegram.api_url,
        config.telegram.bot_token.clone(),
        config.telegram.poll_timeout + Duration::from_secs(10),
    )
    .context("Failed to create Telegram client")?;

    match telegram.get_me().await {
        Ok(me) => info!(
            "Telegram API healthy - Bot: @{}",
            me.username.as_deref().unwrap_or("unknown")
        ),
        Err(e) => {
            error!("Telegram API not reachable at {}: {}", config.telegram.api_url, e);
            return Err(e.into());
        }
    }

    // Create session router
    let router = SessionRouter::with_default_handlers(
        sessions,
        service,
        Arc::new(LogCodeDelivery),
        VerificationPolicy::from(&config.verification),
    );

    info!("Registered {} command handlers", router.handler_count());
    info!("Listening for messages...");

    // Start message receiver
    let receiver = MessageReceiver::new(telegram.clone(), config.telegram.poll_timeout);
    let mut stream = Box::pin(receiver.stream());

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                match router.dispatch(&message.session_id(), &message.text).await {
                    Ok(reply) => {
                        if let Err(e) = telegram
                            .send_message(message.chat_id, &reply.text, reply.keyboard.as_ref())
                            .await
                        {
                            error!("Failed to send reply: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("Handler error: {}", e);
                        let _ = telegram
                            .reply(&message, "Sorry, something went wrong.")
                            .await;
                    }
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn CredentialStore>> {
    match &config.url {
        Some(url) => {
            let store = PgCredentialStore::connect(
                url.expose_secret(),
                config.max_connections,
                config.acquire_timeout,
            )
            .await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE__URL not set - using in-memory credential store");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}
