use crate::db::models::AccessMode;
use crate::error::{AppError, AppResult};

/// Resolved target of a repository-scoped request: who is calling, which
/// repository, and what they may do there.
#[derive(Clone, Debug)]
pub struct RepoContext {
    pub user_id: i64,
    pub repository_id: i64,
    pub access: AccessMode,
}

impl RepoContext {
    pub fn new(user_id: i64, repository_id: i64, access: AccessMode) -> Self {
        Self {
            user_id,
            repository_id,
            access,
        }
    }

    /// Proof of write permission on this repository, or `Forbidden`.
    pub fn writer(&self) -> AppResult<WriteAccess<'_>> {
        if !self.access.is_writer() {
            tracing::debug!(
                user_id = self.user_id,
                repository_id = self.repository_id,
                access = ?self.access,
                "Write access denied"
            );
            return Err(AppError::forbidden(
                "Write access to this repository is required",
            ));
        }
        Ok(WriteAccess { ctx: self })
    }
}

/// Only obtainable through `RepoContext::writer`. Mutating label operations
/// take one of these.
#[derive(Debug, Clone, Copy)]
pub struct WriteAccess<'a> {
    ctx: &'a RepoContext,
}

impl WriteAccess<'_> {
    pub fn repository_id(&self) -> i64 {
        self.ctx.repository_id
    }

    pub fn user_id(&self) -> i64 {
        self.ctx.user_id
    }
}
