use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use picture_api::config::ServerConfig;
use picture_api::router::build_app_router;
use picture_api::server;
use picture_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "picture_api=debug,picture_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        addr = %config.http_addr,
        tls = config.tls.is_some(),
        drain = ?config.drain_interval,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = picture_db::create_pool(&config.dsn)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    picture_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    picture_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Router ---
    let addr = config.http_addr;
    let state = AppState::new(pool.clone(), config);
    let config = state.config.clone();
    let app = build_app_router(state);

    // --- Start server ---
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Starting server");

    server::serve(listener, app, &config)
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}
