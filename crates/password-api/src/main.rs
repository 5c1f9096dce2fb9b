//! Password API - Entry point.

use credential_store::{CredentialStore, MemoryCredentialStore, PasswordService, PgCredentialStore};
use password_api::{
    api::{create_router_with_timeout, AppState},
    config::{Config, DatabaseConfig, LogConfig},
};
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log);

    info!("Starting Password API");

    // Initialize storage
    let store = match open_store(&config.database).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open credential store: {}", e);
            std::process::exit(1);
        }
    };

    // Create application state
    let state = AppState::new(PasswordService::new(store));

    if state.service.health_check().await {
        info!("Credential store healthy");
    } else {
        warn!("Credential store health check failed");
    }

    let app = create_router_with_timeout(state, config.server.request_timeout);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Shutting down...");
}

async fn open_store(
    config: &DatabaseConfig,
) -> Result<Arc<dyn CredentialStore>, credential_store::StoreError> {
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

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let json = config.is_json();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}
