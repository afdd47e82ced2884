//! Filesystem-backed content sources.
//!
//! - [`JsonFileSource`]: one JSON document holding an array of records.
//! - [`DirectorySource`]: a directory where every `*.json` file is one record.
//! - [`TagGroupFile`]: one JSON document holding precomputed tag groups.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::repos::{ContentSource, SourceError, TagGroupSource};
use crate::config::{ContentSettings, SourceKind};
use crate::domain::entities::{ContentRecord, TagGroup, validate_records, validate_tag_groups};

const JSON_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn read_content(&self) -> Result<Vec<ContentRecord>, SourceError> {
        let records: Vec<ContentRecord> = read_json(&self.path).await?;
        validate_records(&records)?;
        debug!(path = %self.path.display(), records = records.len(), "read content file");
        Ok(records)
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Record files in file-name order. Subdirectories and other extensions are skipped.
    async fn record_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|err| SourceError::io(&self.root, err))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| SourceError::io(&self.root, err))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|err| SourceError::io(&path, err))?;
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION));
            if file_type.is_file() && is_json {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory:{}", self.root.display())
    }

    async fn read_content(&self) -> Result<Vec<ContentRecord>, SourceError> {
        let files = self.record_files().await?;
        let mut records = Vec::with_capacity(files.len());
        for path in &files {
            records.push(read_json::<ContentRecord>(path).await?);
        }
        validate_records(&records)?;
        debug!(path = %self.root.display(), records = records.len(), "read content directory");
        Ok(records)
    }
}

#[derive(Debug, Clone)]
pub struct TagGroupFile {
    path: PathBuf,
}

impl TagGroupFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TagGroupSource for TagGroupFile {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn read_tag_groups(&self) -> Result<Vec<TagGroup>, SourceError> {
        let groups: Vec<TagGroup> = read_json(&self.path).await?;
        validate_tag_groups(&groups)?;
        debug!(path = %self.path.display(), groups = groups.len(), "read tag group file");
        Ok(groups)
    }
}

/// Build the content source selected by `settings`.
pub fn content_source(settings: &ContentSettings) -> Arc<dyn ContentSource> {
    match settings.kind {
        SourceKind::File => Arc::new(JsonFileSource::new(&settings.path)),
        SourceKind::Directory => Arc::new(DirectorySource::new(&settings.path)),
    }
}

/// Build the precomputed tag group source, when one is configured.
pub fn tag_group_source(settings: &ContentSettings) -> Option<Arc<dyn TagGroupSource>> {
    settings
        .tag_groups_path
        .as_ref()
        .map(|path| Arc::new(TagGroupFile::new(path)) as Arc<dyn TagGroupSource>)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| SourceError::io(path, err))?;
    serde_json::from_slice(&bytes).map_err(|err| SourceError::parse(path, err))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::error::DomainError;

    fn record_json(id: &str, tags: &[&str]) -> serde_json::Value {
        json!({
            "metadata": {
                "tags": tags,
                "category": "weekly",
                "source": "blog",
                "date": "2024-05-05",
                "title": format!("Issue {id}"),
                "contentId": id
            },
            "content": format!("body {id}")
        })
    }

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).expect("write fixture");
        path
    }

    #[tokio::test]
    async fn file_source_reads_all_records_in_order() {
        let dir = TempDir::new().expect("tempdir");
        let body = json!([record_json("b", &["x"]), record_json("a", &[])]).to_string();
        let path = write(&dir, "content.json", &body);

        let records = JsonFileSource::new(path).read_content().await.expect("read");

        let ids: Vec<&str> = records.iter().map(ContentRecord::content_id).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn empty_array_is_not_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "content.json", "[]");

        let records = JsonFileSource::new(path).read_content().await.expect("read");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "content.json", "[{\"metadata\":");

        let error = JsonFileSource::new(path)
            .read_content()
            .await
            .expect_err("malformed");
        assert!(matches!(error, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("tempdir");

        let error = JsonFileSource::new(dir.path().join("absent.json"))
            .read_content()
            .await
            .expect_err("missing");
        assert!(matches!(error, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let body = json!([record_json("same", &[]), record_json("same", &["t"])]).to_string();
        let path = write(&dir, "content.json", &body);

        let error = JsonFileSource::new(path)
            .read_content()
            .await
            .expect_err("duplicate");
        assert!(matches!(
            error,
            SourceError::Invalid(DomainError::DuplicateContentId { .. })
        ));
    }

    #[tokio::test]
    async fn lookup_by_id_scans_records() {
        let dir = TempDir::new().expect("tempdir");
        let body = json!([record_json("1", &[]), record_json("2", &[])]).to_string();
        let source = JsonFileSource::new(write(&dir, "content.json", &body));

        let found = source.read_content_by_id("2").await.expect("read");
        assert_eq!(found.map(|r| r.metadata.title), Some("Issue 2".to_string()));
        assert!(source.read_content_by_id("9").await.expect("read").is_none());
    }

    #[tokio::test]
    async fn directory_source_reads_json_files_by_name() {
        let dir = TempDir::new().expect("tempdir");
        write(&dir, "02-second.json", &record_json("second", &["a"]).to_string());
        write(&dir, "01-first.json", &record_json("first", &["a"]).to_string());
        write(&dir, "notes.md", "# not a record");
        std::fs::create_dir(dir.path().join("drafts.json")).expect("subdir");

        let records = DirectorySource::new(dir.path())
            .read_content()
            .await
            .expect("read");

        let ids: Vec<&str> = records.iter().map(ContentRecord::content_id).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[tokio::test]
    async fn empty_directory_yields_no_records() {
        let dir = TempDir::new().expect("tempdir");

        let records = DirectorySource::new(dir.path())
            .read_content()
            .await
            .expect("read");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn bad_record_file_fails_the_directory() {
        let dir = TempDir::new().expect("tempdir");
        write(&dir, "ok.json", &record_json("ok", &[]).to_string());
        write(&dir, "broken.json", "{");

        let error = DirectorySource::new(dir.path())
            .read_content()
            .await
            .expect_err("broken");
        assert!(matches!(error, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn tag_group_file_parses_groups() {
        let dir = TempDir::new().expect("tempdir");
        let body = json!([{ "tag": "rust", "contents": [record_json("1", &["rust"])] }]);
        let path = write(&dir, "tagGroup.json", &body.to_string());

        let groups = TagGroupFile::new(path).read_tag_groups().await.expect("read");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tag, "rust");
        assert_eq!(groups[0].contents[0].content_id(), "1");
    }

    #[tokio::test]
    async fn tag_group_file_rejects_repeated_tags_and_records() {
        let dir = TempDir::new().expect("tempdir");
        let repeated_tag = json!([
            { "tag": "t", "contents": [record_json("1", &["t"])] },
            { "tag": "t", "contents": [record_json("2", &["t"])] }
        ]);
        let path = write(&dir, "repeated-tag.json", &repeated_tag.to_string());

        let error = TagGroupFile::new(path)
            .read_tag_groups()
            .await
            .expect_err("repeated tag");
        assert!(matches!(
            error,
            SourceError::Invalid(DomainError::DuplicateTag { .. })
        ));

        let repeated_record = json!([
            { "tag": "t", "contents": [record_json("2", &["t"]), record_json("2", &["t"])] }
        ]);
        let path = write(&dir, "repeated-record.json", &repeated_record.to_string());

        let error = TagGroupFile::new(path)
            .read_tag_groups()
            .await
            .expect_err("repeated record");
        assert!(matches!(
            error,
            SourceError::Invalid(DomainError::DuplicateInGroup { .. })
        ));
    }

    #[test]
    fn settings_select_backend() {
        let settings = ContentSettings {
            path: PathBuf::from("data/posts"),
            kind: SourceKind::Directory,
            tag_groups_path: None,
        };
        assert_eq!(content_source(&settings).describe(), "directory:data/posts");
        assert!(tag_group_source(&settings).is_none());

        let settings = ContentSettings {
            kind: SourceKind::File,
            tag_groups_path: Some(PathBuf::from("data/tagGroup.json")),
            ..settings
        };
        assert_eq!(content_source(&settings).describe(), "file:data/posts");
        assert!(tag_group_source(&settings).is_some());
    }
}
