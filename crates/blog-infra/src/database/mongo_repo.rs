//! MongoDB repository implementation.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::connections::DatabaseConnection;
use super::entity::post::PostDocument;

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB post repository.
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(conn: &DatabaseConnection) -> Self {
        Self::with_collection(conn.posts())
    }

    /// Use an explicit collection instead of the default `posts`.
    pub fn with_collection(collection: Collection<PostDocument>) -> Self {
        Self { collection }
    }
}

pub(crate) fn map_error(err: MongoError) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            RepoError::Constraint("Entity already exists".to_string())
        }
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            RepoError::Connection(err.to_string())
        }
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_error)?;

        found.map(Post::try_from).transpose()
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let document = PostDocument::from(&post);
        self.collection
            .insert_one(&document)
            .await
            .map_err(map_error)?;

        tracing::debug!(post_id = %post.id, "Post document inserted");

        // Hand back the stored representation (millisecond timestamps).
        Post::try_from(document)
    }
}
