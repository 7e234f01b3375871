//! devbook API server.
//!
//! Loads the configuration, registers the routes with their middleware chain
//! and serves them until interrupted.
//!
//! ```bash
//! export SECRET_KEY=$(generate_secret)
//! export API_PORT=9000
//! server
//! ```
//!
//! `SEED_EMAIL` and `SEED_SECRET` register one identity (id 1) in the
//! in-memory credential store so the login flow can be exercised.

use std::sync::Arc;

use devbook::{
    auth::credential_store::InMemoryCredentialStore,
    config::ApiConfig,
    prelude::*,
    web::{
        handlers::routes,
        routes::{configure, with_http_layers},
        state::AppState,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEED_USER_ID: u64 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_PKG_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!("Loaded configuration {config}");

    let store = InMemoryCredentialStore::new();
    if let (Ok(email), Ok(secret)) = (std::env::var("SEED_EMAIL"), std::env::var("SEED_SECRET")) {
        store.register(SEED_USER_ID, &email, &secret)?;
        tracing::info!("Seeded identity {SEED_USER_ID} for {email}");
    }

    let state = AppState::new(&config, Arc::new(store));
    let app = with_http_layers(configure(routes(), state));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
