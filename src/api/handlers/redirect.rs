//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its original URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// Responds `302 Found` with a `Location` header and no body. Lookups never
/// modify the record, so repeated requests redirect to the same place.
///
/// # Errors
///
/// Returns 404 `URL não encontrada!` if the identifier is unknown.
/// Returns 500 with the underlying message on store failures.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&short_url).await?;

    let location = HeaderValue::try_from(link.original_url.as_str()).map_err(|e| {
        AppError::Internal(format!("Stored URL cannot be used as a redirect target: {e}"))
    })?;

    info!("Redirecting '{}' to '{}'", short_url, link.original_url);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
