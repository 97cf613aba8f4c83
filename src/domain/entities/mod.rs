//! Core domain entities.
//!
//! - [`ShortLink`] - A stored short identifier to URL mapping
//! - [`NewShortLink`] - Input for creating a record

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
