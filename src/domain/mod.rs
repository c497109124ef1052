//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].
//!
//! # Link Lifecycle
//!
//! 1. `POST /shorten` inserts a row and derives its short code from the id
//! 2. `GET /{short_code}` increments `clicks` and redirects
//! 3. `GET /stats/{short_code}` reads the row
//!
//! Links are never updated otherwise or deleted.

pub mod entities;
pub mod repositories;
