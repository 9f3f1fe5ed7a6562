pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::db::repositories::{LabelStore, PgAccessRepo, PgLabelRepo, RepositoryAccess};
use crate::middleware::auth::{AuthConfig, AuthService};
use axum::{Router, middleware::from_fn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub labels: Arc<dyn LabelStore>,
    pub access: Arc<dyn RepositoryAccess>,
    pub config: Arc<Config>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        labels: Arc<dyn LabelStore>,
        access: Arc<dyn RepositoryAccess>,
        config: Config,
    ) -> Self {
        let auth_service = AuthService::new(AuthConfig::new(config.jwt_secret.clone()));
        Self {
            labels,
            access,
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
        }
    }

    pub fn with_database(db: DbPool, config: Config) -> Self {
        Self::new(
            Arc::new(PgLabelRepo::new(db.clone())),
            Arc::new(PgAccessRepo::new(db)),
            config,
        )
    }
}

/// 完整应用：API 路由、CORS 与请求追踪
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::create_router(state)
        .layer(cors)
        .layer(from_fn(middleware::request_tracking_middleware))
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt().json().with_max_level(level).init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}
