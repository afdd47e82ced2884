use std::sync::Arc;

use tracing::{debug, info};

use crate::application::repos::{ContentSource, SourceError, TagGroupSource};
use crate::cache::{CacheState, keys};
use crate::domain::entities::{ContentRecord, TagGroup};
use crate::domain::tags;

const SOURCE: &str = "application::content::ContentService";

/// Read side of the site: record listing, tag groups and lookup by id.
#[derive(Clone)]
pub struct ContentService {
    source: Arc<dyn ContentSource>,
    precomputed: Option<Arc<dyn TagGroupSource>>,
    cache: Arc<CacheState>,
}

impl ContentService {
    pub fn new(source: Arc<dyn ContentSource>, cache: Arc<CacheState>) -> Self {
        Self {
            source,
            precomputed: None,
            cache,
        }
    }

    /// Serve tag groups from `groups` instead of aggregating the record list.
    pub fn with_precomputed_groups(mut self, groups: Arc<dyn TagGroupSource>) -> Self {
        self.precomputed = Some(groups);
        self
    }

    pub fn cache(&self) -> &CacheState {
        &self.cache
    }

    /// All records in source order.
    pub async fn contents(&self) -> Result<Arc<Vec<ContentRecord>>, SourceError> {
        self.cache
            .contents
            .get_or_try_compute(keys::CONTENTS, self.cache.options(), || async {
                let records = self.source.read_content().await?;
                info!(
                    target = SOURCE,
                    source = %self.source.describe(),
                    records = records.len(),
                    "Loaded content records"
                );
                Ok::<_, SourceError>(Arc::new(records))
            })
            .await
    }

    /// Records grouped by tag, largest group first.
    pub async fn tag_groups(&self) -> Result<Arc<Vec<TagGroup>>, SourceError> {
        self.cache
            .tag_groups
            .get_or_try_compute(keys::TAG_GROUPS, self.cache.options(), || async {
                let groups = match &self.precomputed {
                    Some(precomputed) => {
                        let mut groups = precomputed.read_tag_groups().await?;
                        tags::sort_by_count(&mut groups);
                        debug!(
                            target = SOURCE,
                            source = %precomputed.describe(),
                            groups = groups.len(),
                            "Loaded precomputed tag groups"
                        );
                        groups
                    }
                    None => {
                        let records = self.contents().await?;
                        tags::aggregate_by_tag(&records)
                    }
                };
                Ok::<_, SourceError>(Arc::new(groups))
            })
            .await
    }

    /// The record whose `contentId` equals `content_id`, if any.
    pub async fn get_content(&self, content_id: &str) -> Result<Option<ContentRecord>, SourceError> {
        let records = self.contents().await?;
        Ok(records
            .iter()
            .find(|record| record.content_id() == content_id)
            .cloned())
    }
}
