//! Core domain entities.
//!
//! - [`ShortLink`] - A shortened URL with its click counter
//! - [`NewLink`] - Input for creating a link

pub mod link;

pub use link::{NewLink, ShortLink};
