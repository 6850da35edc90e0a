use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - represents a persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate post - any subset of the user-supplied fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewPost {
    /// Check the required fields.
    ///
    /// A title must be present and non-empty. Whitespace is not trimmed.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => Ok(()),
            _ => Err(DomainError::Validation(
                "Path `title` is required.".to_string(),
            )),
        }
    }

    /// Names of the fields that were supplied, for logging without content.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(4);
        if self.title.is_some() {
            fields.push("title");
        }
        if self.author.is_some() {
            fields.push("author");
        }
        if self.contents.is_some() {
            fields.push("contents");
        }
        if !self.tags.is_empty() {
            fields.push("tags");
        }
        fields
    }
}

impl Post {
    /// Validate a candidate and build a post with generated ID and timestamps.
    pub fn create(candidate: NewPost) -> Result<Self, DomainError> {
        candidate.validate()?;

        let NewPost {
            title,
            author,
            contents,
            tags,
        } = candidate;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.unwrap_or_default(),
            author,
            contents,
            tags,
            created_at: now,
            updated_at: now,
        })
    }
}
