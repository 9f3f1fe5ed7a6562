pub mod labels;

use crate::AppState;
use crate::middleware::auth::auth_middleware;
use axum::{Router, middleware::from_fn_with_state, routing::get};

pub const API_PREFIX: &str = "/api/v1";

pub fn create_router(state: AppState) -> Router {
    let repo_routes = Router::new()
        .route(
            "/repos/:repo_id/labels",
            get(labels::list_labels).post(labels::create_label),
        )
        .route(
            "/repos/:repo_id/labels/:label_id",
            get(labels::get_label)
                .patch(labels::edit_label)
                .delete(labels::delete_label),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest(API_PREFIX, repo_routes)
        .with_state(state)
}
