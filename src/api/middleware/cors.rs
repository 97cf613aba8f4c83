//! Cross-origin resource sharing.

use tower_http::cors::CorsLayer;

/// Allows any origin, method and header.
///
/// The create endpoint is authorized by a token in the body rather than by
/// cookies, so browser clients on other origins are accepted.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
