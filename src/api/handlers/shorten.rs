//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, Uri},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::RequestOrigin;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com", "token": "<API_TOKEN>" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "error": false,
///   "originalUrl": "https://example.com",
///   "shortUrl": "Xk3_9aQz",
///   "completeUrl": "http://localhost:3000/Xk3_9aQz"
/// }
/// ```
///
/// # Errors
///
/// - 400 `API Token obrigatório` if the token is missing or empty
/// - 401 `API Token inválido` if the token does not match
/// - 400 if a JSON body cannot be parsed
/// - 500 with the underlying message on store failures
///
/// A body sent without a JSON content type is treated as empty, so it
/// fails the token check.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        // Bodies not declared as JSON are left unparsed.
        Err(JsonRejection::MissingJsonContentType(_)) => ShortenRequest::default(),
        Err(rejection) => return Err(AppError::BadRequest(rejection.body_text())),
    };

    state.auth_service.authorize(payload.token.as_deref())?;

    let origin = RequestOrigin::from_request(&headers, &uri, state.behind_proxy)?;

    let link = state
        .link_service
        .create_short_link(payload.original_url, &origin)
        .await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse::from(link))))
}
