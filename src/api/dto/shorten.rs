//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortLink;

/// Request to create a short link.
///
/// Both fields are optional at the wire level: a missing token is reported
/// as such rather than as a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub original_url: Option<String>,
    pub token: Option<String>,
}

/// Successful creation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub error: bool,
    pub original_url: String,
    pub short_url: String,
    pub complete_url: Option<String>,
}

impl From<ShortLink> for ShortenResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            error: false,
            original_url: link.original_url,
            short_url: link.short_url,
            complete_url: link.complete_url,
        }
    }
}
