use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Post use cases. Cheap to clone; the repository is shared.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post.
    ///
    /// No retries; validation and store errors are returned unchanged.
    pub async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = Post::create(input)?;
        let saved = self.repo.save(post).await?;

        tracing::debug!(post_id = %saved.id, tags = saved.tags.len(), "Post persisted");
        Ok(saved)
    }

    /// Look up a post by ID.
    pub async fn find_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }
}
