use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::ports::Repository;
use crate::domain::post::errors::PostError;
use crate::domain::post::events::PostCreatedEvent;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostNotifier;
use crate::domain::post::ports::PostServicePort;

/// Domain service implementation for post operations.
pub struct PostService<R, N>
where
    R: Repository,
    N: PostNotifier,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    page_size: u64,
}

impl<R, N> PostService<R, N>
where
    R: Repository,
    N: PostNotifier,
{
    /// Create a new post service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Active storage backend
    /// * `notifier` - Real-time fan-out for created posts
    /// * `page_size` - Posts per listing page
    pub fn new(repository: Arc<R>, notifier: Arc<N>, page_size: u64) -> Self {
        Self {
            repository,
            notifier,
            page_size,
        }
    }
}

#[async_trait]
impl<R, N> PostServicePort for PostService<R, N>
where
    R: Repository,
    N: PostNotifier,
{
    async fn create_post(
        &self,
        owner_id: &AccountId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        if self.repository.get_account_by_id(owner_id).await?.is_none() {
            return Err(PostError::UnknownOwner(owner_id.to_string()));
        }

        let post = Post {
            id: PostId::new(),
            owner_id: *owner_id,
            title: command.title,
            content: command.content,
            created_at: Utc::now(),
        };

        self.repository.insert_post(&post).await?;

        let event = PostCreatedEvent::new(&post);
        if let Err(e) = self.notifier.post_created(&event).await {
            tracing::error!(
                "Failed to publish {} event for post {}: {}",
                event.event_type(),
                post.id,
                e
            );
        }

        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .get_post_by_id(id)
            .await?
            .ok_or_else(|| PostError::NotFound(id.to_string()))
    }

    async fn update_post(
        &self,
        id: &PostId,
        owner_id: &AccountId,
        command: UpdatePostCommand,
    ) -> Result<PostUpdate, PostError> {
        let update = PostUpdate {
            id: *id,
            owner_id: *owner_id,
            title: command.title,
            content: command.content,
        };

        self.repository.update_post(&update).await?;

        Ok(update)
    }

    async fn delete_post(&self, id: &PostId, owner_id: &AccountId) -> Result<(), PostError> {
        self.repository.delete_post(id, owner_id).await?;
        Ok(())
    }

    async fn list_posts(&self, page_number: u64) -> Result<Vec<Post>, PostError> {
        let page = Page::new(page_number, self.page_size)?;
        Ok(self.repository.list_posts(page).await?)
    }
}
