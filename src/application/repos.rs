//! Source traits describing where content records come from.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{ContentRecord, TagGroup};
use crate::domain::error::DomainError;

/// The content source could not be read or did not hold valid records.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read content source `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content source `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("content source holds invalid records")]
    Invalid(#[from] DomainError),
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable location for logs.
    fn describe(&self) -> String;

    /// Read every record. An empty source is `Ok(vec![])`.
    async fn read_content(&self) -> Result<Vec<ContentRecord>, SourceError>;

    /// Find one record by `metadata.contentId`. Absence is `Ok(None)`.
    async fn read_content_by_id(
        &self,
        content_id: &str,
    ) -> Result<Option<ContentRecord>, SourceError> {
        let records = self.read_content().await?;
        Ok(records
            .into_iter()
            .find(|record| record.content_id() == content_id))
    }
}

/// Tag groups computed ahead of time by an external build step.
#[async_trait]
pub trait TagGroupSource: Send + Sync {
    fn describe(&self) -> String;

    async fn read_tag_groups(&self) -> Result<Vec<TagGroup>, SourceError>;
}
