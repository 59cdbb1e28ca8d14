//! # Minkan API Server
//!
//! HTTP API for the Minkan board application. Serves authentication,
//! multi-tenant boards with drag-and-drop ordering, notes, activity
//! history, and subscription billing.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p minkan-api
//! ```

use std::sync::Arc;

use minkan_api::{
    app::{build_router, AppState},
    config::Config,
};
use minkan_shared::{billing::stripe::StripeClient, db};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minkan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Minkan API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool_config = db::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let pool = db::create_pool(pool_config).await?;

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let billing = Arc::new(StripeClient::new(
        config.stripe.secret_key.clone(),
        config.stripe.price_id.clone(),
    ));

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config, billing);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
