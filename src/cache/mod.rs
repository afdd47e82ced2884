//! Weekly Digest Cache
//!
//! Memoizes the two expensive reads of the content service for the lifetime
//! of the process:
//!
//! - **contents**: the record list read from the content source
//! - **tag groups**: the records grouped by tag
//!
//! Values are computed on first use and shared afterwards; concurrent first
//! callers share a single computation. Nothing is ever evicted, so edits to
//! the content source become visible after a restart.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! debug = false
//! ```

mod config;
pub mod keys;
mod state;
mod store;

pub use config::CacheConfig;
pub use state::CacheState;
pub use store::{ComputeOptions, MemoCache};

pub(crate) use store::{METRIC_CACHE_COMPUTE_ERROR, METRIC_CACHE_HIT, METRIC_CACHE_MISS};
