//! Short link entity representing a stored URL mapping.

use chrono::{DateTime, Utc};

/// A stored mapping from a short identifier to its destination.
///
/// Records are immutable once created: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub complete_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_url: String,
        complete_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_url,
            complete_url,
            created_at,
        }
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_url: String,
    pub complete_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "https://example.com".to_string(),
            "Ab3_x-9Z".to_string(),
            Some("http://localhost:3000/Ab3_x-9Z".to_string()),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_url, "Ab3_x-9Z");
        assert_eq!(
            link.complete_url.as_deref(),
            Some("http://localhost:3000/Ab3_x-9Z")
        );
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_complete_url_is_optional() {
        let link = ShortLink::new(
            2,
            "https://rust-lang.org".to_string(),
            "qwertyui".to_string(),
            None,
            Utc::now(),
        );

        assert!(link.complete_url.is_none());
    }
}
