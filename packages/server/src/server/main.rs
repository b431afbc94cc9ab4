// Main entry point for the review API server

use std::sync::Arc;

use anyhow::{Context, Result};
use review_core::domains::reviews::store::PostgresReviewStore;
use review_core::kernel::{ServerDeps, SnowflakeGenerator};
use review_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,review_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Review API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // ID generator
    let id_generator = SnowflakeGenerator::from_start_time(
        &config.snowflake_start_time,
        config.snowflake_machine_id,
    )
    .context("Failed to create snowflake ID generator")?;
    tracing::info!(
        machine_id = config.snowflake_machine_id,
        start_time = %config.snowflake_start_time,
        "Snowflake ID generator ready"
    );

    // Build application
    let deps = ServerDeps::new(
        Arc::new(PostgresReviewStore::new(pool)),
        Arc::new(id_generator),
    );
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
