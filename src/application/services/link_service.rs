//! Short link creation and resolution service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::request_origin::RequestOrigin;

/// Number of identifiers tried before giving up on a collision streak.
const MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving short links.
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn ShortLinkRepository>) -> Self {
        Self { repository }
    }

    /// Stores a new short link for `original_url`.
    ///
    /// The destination is stored as given; it is not validated. The complete
    /// URL is built from the request `origin` and stored with the record.
    ///
    /// # Code Generation
    ///
    /// A random identifier is inserted directly and the store's unique
    /// constraint detects collisions. On [`AppError::Conflict`] a fresh
    /// identifier is tried, up to 5 attempts in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreWrite`] if `original_url` is absent, the
    /// insert fails, or every attempt collides.
    /// Returns [`AppError::Connection`] if the store is unreachable.
    pub async fn create_short_link(
        &self,
        original_url: Option<String>,
        origin: &RequestOrigin,
    ) -> Result<ShortLink, AppError> {
        let original_url = original_url
            .ok_or_else(|| AppError::StoreWrite("originalUrl is required".to_string()))?;

        for attempt in 1..=MAX_ATTEMPTS {
            let short_url = generate_code()?;
            let new_link = NewShortLink {
                original_url: original_url.clone(),
                complete_url: Some(origin.complete_url(&short_url)),
                short_url,
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    info!("Created short link '{}' -> '{}'", link.short_url, link.original_url);
                    return Ok(link);
                }
                Err(AppError::Conflict(reason)) => {
                    warn!(attempt, "Short URL collision, regenerating: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::StoreWrite(format!(
            "Failed to generate a unique short URL after {MAX_ATTEMPTS} attempts"
        )))
    }

    /// Looks up the link stored under `short_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing is stored under it.
    /// Returns [`AppError::StoreRead`] or [`AppError::Connection`] on store failures.
    pub async fn resolve(&self, short_url: &str) -> Result<ShortLink, AppError> {
        debug!("Resolving short URL '{}'", short_url);

        self.repository
            .find_by_short_url(short_url)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Verifies that the store answers queries.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
