use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::errors::NotifierError;
use crate::domain::post::errors::PostError;
use crate::domain::post::events::PostCreatedEvent;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;
use crate::domain::post::models::UpdatePostCommand;

/// Port for post operations.
///
/// Every mutating call takes the caller's identity as resolved from the
/// access token; it is never read from a request body.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by `owner_id`.
    ///
    /// # Errors
    /// * `UnknownOwner` - The token refers to an account that no longer exists
    /// * `Repository` - Storage failure
    async fn create_post(
        &self,
        owner_id: &AccountId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// Retrieve post by identifier. No ownership check.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Repository` - Storage failure
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    /// Replace title and content of a post owned by `owner_id`.
    ///
    /// Succeeds without effect when the post is missing or owned by someone
    /// else; the two cases cannot be told apart.
    ///
    /// # Returns
    /// The applied change
    async fn update_post(
        &self,
        id: &PostId,
        owner_id: &AccountId,
        command: UpdatePostCommand,
    ) -> Result<PostUpdate, PostError>;

    /// Delete a post owned by `owner_id`.
    ///
    /// Same silent-no-op semantics as [`PostServicePort::update_post`].
    async fn delete_post(&self, id: &PostId, owner_id: &AccountId) -> Result<(), PostError>;

    /// List one page of posts, newest first.
    ///
    /// # Errors
    /// * `InvalidPage` - Page number is out of range
    /// * `Repository` - Storage failure
    async fn list_posts(&self, page_number: u64) -> Result<Vec<Post>, PostError>;
}

/// Fire-and-forget fan-out of post events to connected clients.
#[async_trait]
pub trait PostNotifier: Send + Sync + 'static {
    /// Announce a newly created post.
    ///
    /// Implementations must not block on slow subscribers.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event could not be encoded
    /// * `DeliveryFailed` - Event could not be handed to subscribers
    async fn post_created(&self, event: &PostCreatedEvent) -> Result<(), NotifierError>;
}
