//! Utility functions for code encoding, URL processing, and request handling.
//!
//! - [`base62`] - Short code encoding and decoding
//! - [`url_normalizer`] - URL validation and canonicalization
//! - [`base_url`] - Public base URL resolution from config or headers

pub mod base62;
pub mod base_url;
pub mod url_normalizer;
