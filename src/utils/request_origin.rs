//! Scheme and host of an inbound request, used to build complete short URLs.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Where a request was addressed to, as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    /// Resolves the origin from request headers.
    ///
    /// The host comes from the `Host` header (port included), falling back to
    /// the URI authority for HTTP/2 requests. The scheme is `http` unless
    /// `trust_forwarded` is set, in which case the first `X-Forwarded-Proto`
    /// value wins and `X-Forwarded-Host` overrides the host.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if no host can be determined or the
    /// `Host` header is not valid UTF-8.
    pub fn from_request(
        headers: &HeaderMap,
        uri: &Uri,
        trust_forwarded: bool,
    ) -> Result<Self, AppError> {
        let forwarded_host = trust_forwarded
            .then(|| first_forwarded_value(headers, FORWARDED_HOST))
            .flatten();

        let host = match forwarded_host {
            Some(host) => host.to_string(),
            None => match headers.get(header::HOST) {
                Some(value) => value
                    .to_str()
                    .map_err(|_| AppError::BadRequest("Invalid Host header".to_string()))?
                    .to_string(),
                None => uri
                    .authority()
                    .map(|a| a.as_str().to_string())
                    .ok_or_else(|| AppError::BadRequest("Missing Host header".to_string()))?,
            },
        };

        let scheme = trust_forwarded
            .then(|| first_forwarded_value(headers, FORWARDED_PROTO))
            .flatten()
            .map(|proto| proto.to_ascii_lowercase())
            .unwrap_or_else(|| "http".to_string());

        Ok(Self { scheme, host })
    }

    /// Builds `{scheme}://{host}/{short_url}`.
    pub fn complete_url(&self, short_url: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.host, short_url)
    }
}

/// First non-empty entry of a comma-separated proxy header.
fn first_forwarded_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|v| !v.is_empty())
}
