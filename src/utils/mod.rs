//! Utility functions used across the application:
//!
//! - [`code_generator`] - Random short identifier generation
//! - [`request_origin`] - Scheme/host extraction for complete short URLs
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod request_origin;
