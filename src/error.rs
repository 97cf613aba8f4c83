//! Application error type and its HTTP mapping.
//!
//! Every failure response shares one JSON shape:
//!
//! ```json
//! { "error": true, "error_txt": "URL não encontrada!" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// JSON body written for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub error_txt: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_txt: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The create request carried no token, or an empty one.
    #[error("API Token obrigatório")]
    MissingToken,

    /// The token does not match the configured shared secret.
    #[error("API Token inválido")]
    InvalidToken,

    /// No link is stored under the requested short identifier.
    #[error("URL não encontrada!")]
    NotFound,

    /// The request could not be understood (malformed body, missing Host).
    #[error("{0}")]
    BadRequest(String),

    /// The store could not be reached within the connect timeout.
    #[error("{0}")]
    Connection(String),

    /// Insert failed.
    #[error("{0}")]
    StoreWrite(String),

    /// Lookup failed.
    #[error("{0}")]
    StoreRead(String),

    /// Unique constraint on the short identifier was hit.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Connection(_)
            | AppError::StoreWrite(_)
            | AppError::StoreRead(_)
            | AppError::Conflict(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
