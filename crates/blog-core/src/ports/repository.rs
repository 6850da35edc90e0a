use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Post repository - the persistence contract for posts.
///
/// Implementations own the stored records; callers keep no copy after
/// `save` returns.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Insert a new post and return it as acknowledged by the store.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;
}
