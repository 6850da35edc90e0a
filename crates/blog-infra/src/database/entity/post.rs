//! Post document as stored in MongoDB.

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

fn to_chrono(value: bson::DateTime) -> Result<DateTime<Utc>, RepoError> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| RepoError::Query(format!("timestamp out of range: {value}")))
}

/// Conversion from domain Post to the stored document.
impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            contents: post.contents.clone(),
            tags: post.tags.clone(),
            created_at: bson::DateTime::from_millis(post.created_at.timestamp_millis()),
            updated_at: bson::DateTime::from_millis(post.updated_at.timestamp_millis()),
        }
    }
}

/// Conversion from the stored document back to the domain Post.
impl TryFrom<PostDocument> for Post {
    type Error = RepoError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&doc.id)
            .map_err(|e| RepoError::Query(format!("invalid post id {:?}: {e}", doc.id)))?;

        Ok(Self {
            id,
            title: doc.title,
            author: doc.author,
            contents: doc.contents,
            tags: doc.tags,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}
