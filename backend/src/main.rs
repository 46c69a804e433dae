//! MetabolicAI Backend
//!
//! Relays health-metrics analysis requests to an external language model.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Prompt rendering and the completion client
//! - Shared crate: Metrics engine and wire types

use anyhow::Result;
use metabolic_ai_backend::{config, routes, state::AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        model = %config.ai.model,
        "Starting MetabolicAI Backend"
    );

    check_completion_config(&config);

    // Create application state
    let state = AppState::new(config.clone())?;

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "metabolic_ai_backend=info,tower_http=info".into()
        } else {
            "metabolic_ai_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Warn about completion settings that will make every analysis fail
///
/// The server still starts; `/api/analyze` answers 500 until fixed.
fn check_completion_config(config: &config::AppConfig) {
    if !config.ai.has_credentials() {
        warn!(
            "{} is not set. AI analysis will not work.",
            config::API_KEY_ENV
        );
    }

    if config::AppConfig::is_production() && config.ai.base_url.starts_with("http://") {
        warn!(base_url = %config.ai.base_url, "Completion service is reached over plain HTTP");
    }

    if let Some(dir) = &config.server.static_dir {
        if !std::path::Path::new(dir).join("index.html").exists() {
            warn!(static_dir = %dir, "Static directory has no index.html");
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
