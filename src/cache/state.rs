use std::sync::Arc;

use crate::domain::entities::{ContentRecord, TagGroup};

use super::config::CacheConfig;
use super::store::{ComputeOptions, MemoCache};

/// Caches owned by the content service, built once at startup.
pub struct CacheState {
    pub config: CacheConfig,
    pub contents: MemoCache<Arc<Vec<ContentRecord>>>,
    pub tag_groups: MemoCache<Arc<Vec<TagGroup>>>,
}

impl CacheState {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            contents: MemoCache::new("contents", &config),
            tag_groups: MemoCache::new("tag_groups", &config),
            config,
        }
    }

    pub fn options(&self) -> ComputeOptions {
        ComputeOptions::debug(self.config.debug)
    }
}

impl Default for CacheState {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
