//! PostgreSQL persistence.
//!
//! - [`ConnectionManager`] - Lazily opened, cached connection pool
//! - [`PgShortLinkRepository`] - Short link storage and lookup

pub mod connection;
pub mod pg_short_link_repository;

pub use connection::{ConnectionManager, ConnectionSettings, PgPoolFactory, PoolFactory};
pub use pg_short_link_repository::PgShortLinkRepository;
