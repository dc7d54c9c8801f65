// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AmpUp Relay Server
//!
//! Relays browser logins and API calls to the AmpUp charging network.

use ampup_relay::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        ampup = %config.ampup_base_url,
        identity = %config.identity_toolkit_url,
        "Starting AmpUp relay"
    );

    if config.firebase_api_key.is_none() {
        tracing::warn!("FIREBASE_API_KEY not set, token exchange disabled");
    }

    let port = config.port;
    let state = Arc::new(AppState::new(config)?);

    // Build router
    let app = ampup_relay::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    tracing::info!(
        url = %format!("http://localhost:{}/health", port),
        "Health check"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ampup_relay=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
