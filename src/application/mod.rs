//! Application services orchestrating domain logic and content sources.

pub mod content;
pub mod error;
pub mod repos;
