//! Content records as published by the site and the tag groups derived from them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DomainError;

/// Descriptive fields attached to every published record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: String,
    /// ISO-8601 date as written by the authoring tool.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    pub content_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub metadata: ContentMetadata,
    /// Body text, or whatever payload the authoring tool emitted.
    #[serde(default)]
    pub content: Value,
}

impl ContentRecord {
    pub fn content_id(&self) -> &str {
        &self.metadata.content_id
    }

    pub fn tags(&self) -> &[String] {
        &self.metadata.tags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub tag: String,
    pub contents: Vec<ContentRecord>,
}

impl TagGroup {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            contents: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Check the per-source invariants: every record has a non-blank id and no id repeats.
pub fn validate_records(records: &[ContentRecord]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let id = record.content_id();
        if id.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "record at position {position} has an empty contentId"
            )));
        }
        if !seen.insert(id) {
            return Err(DomainError::duplicate_content_id(id));
        }
    }
    Ok(())
}

/// Check precomputed groups: tags are unique and no record repeats inside a group.
pub fn validate_tag_groups(groups: &[TagGroup]) -> Result<(), DomainError> {
    let mut tags = HashSet::with_capacity(groups.len());
    for group in groups {
        if !tags.insert(group.tag.as_str()) {
            return Err(DomainError::duplicate_tag(&group.tag));
        }
        let mut ids = HashSet::with_capacity(group.len());
        for record in &group.contents {
            if !ids.insert(record.content_id()) {
                return Err(DomainError::duplicate_in_group(
                    &group.tag,
                    record.content_id(),
                ));
            }
        }
    }
    Ok(())
}
