//! Campus Yuva backend server
//!
//! Main application entry point

use tracing::info;

use campus_yuva::{
    api::{build_router, AppState},
    config::Settings,
    database::connection::{create_pool, run_migrations, PoolConfig},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must stay alive for file output
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting Campus Yuva backend...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = PoolConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..PoolConfig::default()
    };
    let pool = create_pool(&pool_config).await?;

    // Run database migrations
    run_migrations(&pool).await?;

    // Build application state and router
    let state = AppState::new(pool);
    let router = build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Campus Yuva backend has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
    }
}
