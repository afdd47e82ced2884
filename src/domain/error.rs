use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("content id `{content_id}` appears more than once")]
    DuplicateContentId { content_id: String },
    #[error("tag `{tag}` appears in more than one group")]
    DuplicateTag { tag: String },
    #[error("content id `{content_id}` appears more than once in tag group `{tag}`")]
    DuplicateInGroup { tag: String, content_id: String },
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn duplicate_content_id(content_id: impl Into<String>) -> Self {
        Self::DuplicateContentId {
            content_id: content_id.into(),
        }
    }

    pub fn duplicate_tag(tag: impl Into<String>) -> Self {
        Self::DuplicateTag { tag: tag.into() }
    }

    pub fn duplicate_in_group(tag: impl Into<String>, content_id: impl Into<String>) -> Self {
        Self::DuplicateInGroup {
            tag: tag.into(),
            content_id: content_id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
