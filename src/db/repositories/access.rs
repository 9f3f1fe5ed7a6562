use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::models::AccessMode;
use crate::db::{DbPool, with_conn};

use super::{RepositoryAccess, StoreError};

/// Effective mode of `user_id` on a repository. Owners always get `Owner`;
/// public repositories are readable by everyone.
pub fn effective_mode(
    owner_id: i64,
    is_private: bool,
    user_id: i64,
    granted: Option<AccessMode>,
) -> AccessMode {
    if owner_id == user_id {
        return AccessMode::Owner;
    }
    let floor = if is_private {
        AccessMode::None
    } else {
        AccessMode::Read
    };
    granted.unwrap_or(floor).max(floor)
}

#[derive(Clone)]
pub struct PgAccessRepo {
    pool: DbPool,
}

impl PgAccessRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepositoryAccess for PgAccessRepo {
    async fn access_mode(
        &self,
        user_id: i64,
        repository_id: i64,
    ) -> Result<Option<AccessMode>, StoreError> {
        with_conn(&self.pool, move |conn| {
            use crate::schema::{access, repositories};

            let repo = repositories::table
                .find(repository_id)
                .select((repositories::owner_id, repositories::is_private))
                .first::<(i64, bool)>(conn)
                .optional()?;
            let Some((owner_id, is_private)) = repo else {
                return Ok(None);
            };

            let granted = access::table
                .filter(access::user_id.eq(user_id))
                .filter(access::repo_id.eq(repository_id))
                .select(access::mode)
                .first::<i32>(conn)
                .optional()?
                .map(AccessMode::from_i32);

            Ok(Some(effective_mode(owner_id, is_private, user_id, granted)))
        })
        .await
    }
}
