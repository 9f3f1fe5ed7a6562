//! Persistence seams for labels and repository access.
//!
//! Each trait has a PostgreSQL implementation backed by the diesel pool and an
//! in-memory implementation used by tests and local runs.

pub mod access;
pub mod labels;
pub mod memory;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::db::models::{AccessMode, Label, NewLabel};

pub use access::PgAccessRepo;
pub use labels::PgLabelRepo;
pub use memory::{MemoryAccess, MemoryLabelStore};

/// Classified store failure. Callers match on the variant instead of
/// inspecting backend error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record does not exist")]
    NotFound,

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StoreError::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => {
                    StoreError::ConstraintViolation(info.message().to_string())
                }
                DatabaseErrorKind::UnableToSendCommand => {
                    StoreError::Unavailable(info.message().to_string())
                }
                _ => StoreError::Backend(info.message().to_string()),
            },
            other => StoreError::Backend(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Label persistence, scoped by repository where it matters.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Looks a label up by id alone. Returns `StoreError::NotFound` when no
    /// such label exists.
    async fn find_by_id(&self, id: i64) -> Result<Label, StoreError>;

    async fn find_all_by_repository(&self, repository_id: i64) -> Result<Vec<Label>, StoreError>;

    /// Inserts the label and returns the id assigned by the store.
    async fn insert(&self, label: NewLabel) -> Result<i64, StoreError>;

    /// Persists `name` and `color` of an existing label, matched on both
    /// `id` and `repository_id`. Returns `StoreError::NotFound` when no row
    /// matched.
    async fn update(&self, label: &Label) -> Result<(), StoreError>;

    /// Deletes the label only if it belongs to `repository_id`. Returns
    /// whether a row was removed.
    async fn delete_by_repository_and_id(
        &self,
        repository_id: i64,
        id: i64,
    ) -> Result<bool, StoreError>;
}

/// Answers what a user may do on a repository.
#[async_trait]
pub trait RepositoryAccess: Send + Sync {
    /// `None` when the repository does not exist.
    async fn access_mode(
        &self,
        user_id: i64,
        repository_id: i64,
    ) -> Result<Option<AccessMode>, StoreError>;
}
