//! # Short link API
//!
//! A minimal URL shortening service built with Axum and PostgreSQL.
//!
//! - `POST /api/shorten` stores a long URL under a random short identifier,
//!   authorized by a shared-secret token in the request body.
//! - `GET /{short_url}` redirects to the stored URL.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The short link entity and repository trait
//! - **Application Layer** ([`application`]) - Link creation/resolution and token check
//! - **Infrastructure Layer** ([`infrastructure`]) - Lazily opened PostgreSQL pool and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Deployment
//!
//! The same router either listens on a local port or is handed to a hosting
//! platform that invokes it per request; see [`server`].
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService};
    pub use crate::domain::entities::{NewShortLink, ShortLink};
    pub use crate::domain::repositories::ShortLinkRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
