//! Helpers for classifying SQLx errors.

/// Name of the unique constraint on `short_links.short_url`.
pub const SHORT_URL_UNIQUE_CONSTRAINT: &str = "short_links_short_url_key";

pub fn is_unique_violation_on_short_url(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_URL_UNIQUE_CONSTRAINT))
}

/// True for errors raised while obtaining a connection rather than running SQL.
pub fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    )
}
