//! Shared-secret authorization for write operations.

use crate::error::AppError;

/// Authorizes link creation by comparing the caller's token with the
/// configured shared secret.
pub struct AuthService {
    api_token: String,
}

impl AuthService {
    pub fn new(api_token: String) -> Self {
        Self { api_token }
    }

    /// Checks a token supplied in a request body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingToken`] if the token is absent or empty.
    /// Returns [`AppError::InvalidToken`] if it does not equal the secret.
    pub fn authorize(&self, token: Option<&str>) -> Result<(), AppError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingToken)?;

        if token != self.api_token {
            return Err(AppError::InvalidToken);
        }

        Ok(())
    }
}
