use repo_labels::{AppState, build_app, config::Config, db, error::AppError, init_tracing};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let pool = db::build_pool(&config.database())
        .map_err(|e| AppError::internal(format!("Failed to create database pool: {}", e)))?;

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let app = build_app(AppState::with_database(pool, config));

    tracing::info!(%addr, "Server running");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}
