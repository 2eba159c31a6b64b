pub mod memory;
pub mod pool;
pub mod url;

pub use memory::InMemoryUrlRepository;
pub use pool::ConnectionPool;
pub use url::UrlRepository;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::url::{NewUrl, UrlModel};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("{0}")]
    Query(#[source] sqlx::Error),
}

impl StoreError {
    /// Acquisition failures are connectivity problems regardless of the
    /// underlying variant.
    pub fn acquire(error: sqlx::Error) -> Self {
        StoreError::Unavailable(error)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(error),
            other => StoreError::Query(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for URL records. Soft-deleted records stay in storage but are
/// invisible to [`UrlStore::list_active`], [`UrlStore::find_active`] and
/// [`UrlStore::update_active`].
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// All records that are not soft-deleted, newest first.
    async fn list_active(&self) -> StoreResult<Vec<UrlModel>>;

    /// Inserts a new record with a generated id and `createdAt == updatedAt`.
    async fn insert(&self, url: NewUrl) -> StoreResult<UrlModel>;

    async fn find_active(&self, id: Uuid) -> StoreResult<Option<UrlModel>>;

    /// Replaces the mutable fields and refreshes `updatedAt`.
    /// Returns `None` when no active record has this id.
    async fn update_active(&self, id: Uuid, url: NewUrl) -> StoreResult<Option<UrlModel>>;

    /// Marks the record deleted and stamps `deletedAt`, whether or not it was
    /// already deleted. Returns `false` when no record has this id.
    async fn soft_delete(&self, id: Uuid) -> StoreResult<bool>;
}
