//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for storing and resolving short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short identifier already exists.
    /// Returns [`AppError::Connection`] if the store cannot be reached.
    /// Returns [`AppError::StoreWrite`] on any other database error.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds the link stored under `short_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if the store cannot be reached.
    /// Returns [`AppError::StoreRead`] on any other database error.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<ShortLink>, AppError>;

    /// Round-trips a trivial query to verify the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
