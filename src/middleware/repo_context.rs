use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::services::context::RepoContext;

#[derive(Deserialize)]
struct RepoPath {
    repo_id: i64,
}

/// 根据调用者的权限解析 `:repo_id`
/// 调用者无法读取的仓库按不存在处理
#[async_trait]
impl<S> FromRequestParts<S> for RepoContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::auth("Authentication required"))?;

        let Path(RepoPath { repo_id }) = Path::<RepoPath>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Invalid repository id"))?;

        let app = AppState::from_ref(state);
        let access = app
            .access
            .access_mode(user.id, repo_id)
            .await
            .map_err(AppError::store("resolve_repository"))?;

        match access {
            Some(mode) if mode.can_read() => Ok(RepoContext::new(user.id, repo_id, mode)),
            _ => {
                tracing::debug!(user_id = user.id, repository_id = repo_id, "Repository not visible");
                Err(AppError::not_found("repository"))
            }
        }
    }
}
