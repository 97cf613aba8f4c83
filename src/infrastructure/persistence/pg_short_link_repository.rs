//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::ConnectionManager;
use crate::utils::db_error::{is_connection_error, is_unique_violation_on_short_url};

/// PostgreSQL repository for short link storage and retrieval.
///
/// Every operation obtains the pool from the shared [`ConnectionManager`],
/// which opens it on first use.
pub struct PgShortLinkRepository {
    connections: Arc<ConnectionManager>,
}

impl PgShortLinkRepository {
    /// Creates a new repository over a shared connection manager.
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    short_url: String,
    complete_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.id,
            row.original_url,
            row.short_url,
            row.complete_url,
            row.created_at,
        )
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation_on_short_url(&e) {
        AppError::Conflict(e.to_string())
    } else if is_connection_error(&e) {
        AppError::Connection(e.to_string())
    } else {
        AppError::StoreWrite(e.to_string())
    }
}

fn map_read_error(e: sqlx::Error) -> AppError {
    if is_connection_error(&e) {
        AppError::Connection(e.to_string())
    } else {
        AppError::StoreRead(e.to_string())
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let pool = self.connections.get().await?;

        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (original_url, short_url, complete_url)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_url, complete_url, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_url)
        .bind(&new_link.complete_url)
        .fetch_one(&pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<ShortLink>, AppError> {
        let pool = self.connections.get().await?;

        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, original_url, short_url, complete_url, created_at
            FROM short_links
            WHERE short_url = $1
            "#,
        )
        .bind(short_url)
        .fetch_optional(&pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn ping(&self) -> Result<(), AppError> {
        let pool = self.connections.get().await?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(map_read_error)?;

        Ok(())
    }
}
