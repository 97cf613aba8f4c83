//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::repositories::ShortLinkRepository;

/// State shared by all handlers.
///
/// Cloning is cheap: services are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    /// Trust `X-Forwarded-Proto` / `X-Forwarded-Host` when building complete URLs.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires services over a repository.
    ///
    /// # Arguments
    ///
    /// - `repository` - storage backend for short links
    /// - `api_token` - shared secret required to create links
    /// - `behind_proxy` - whether proxy headers describe the client-facing origin
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        api_token: String,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            auth_service: Arc::new(AuthService::new(api_token)),
            behind_proxy,
        }
    }
}
