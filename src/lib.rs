//! Weekly digest content service.
//!
//! Reads published content records, groups them by tag and serves both over a
//! small JSON API. See `application::content::ContentService` for the read side
//! and `infra::http::build_router` for the HTTP surface.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
