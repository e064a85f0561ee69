use async_trait::async_trait;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::errors::RepositoryError;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;

/// Persistence operations for accounts and posts.
///
/// Exactly one implementation is chosen at startup and handed to every
/// service as an `Arc`; it is never swapped while serving. Each call is an
/// independent single-row operation: no transactions, no batching.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `Conflict` - Identifier or email is already taken
    /// * `Storage` - Database operation failed
    async fn insert_account(&self, account: &Account) -> Result<(), RepositoryError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn get_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn get_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Persist a new post.
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn insert_post(&self, post: &Post) -> Result<(), RepositoryError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;

    /// Overwrite title and content of the post matching both `update.id` and
    /// `update.owner_id`.
    ///
    /// Matching nothing is not an error: a missing post and a post owned by
    /// someone else are indistinguishable here.
    async fn update_post(&self, update: &PostUpdate) -> Result<(), RepositoryError>;

    /// Remove the post matching both `id` and `owner_id`.
    ///
    /// Same filter semantics as [`Repository::update_post`].
    async fn delete_post(&self, id: &PostId, owner_id: &AccountId) -> Result<(), RepositoryError>;

    /// Retrieve one page of posts, newest first.
    ///
    /// Ordering is stable for a given page as long as no posts are written.
    async fn list_posts(&self, page: Page) -> Result<Vec<Post>, RepositoryError>;

    /// Release underlying resources.
    ///
    /// Must be called at most once, during shutdown.
    async fn close(&self) -> Result<(), RepositoryError>;
}

#[cfg(test)]
pub mod mocks {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestRepository {}

        #[async_trait]
        impl Repository for TestRepository {
            async fn insert_account(&self, account: &Account) -> Result<(), RepositoryError>;
            async fn get_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;
            async fn get_account_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, RepositoryError>;
            async fn insert_post(&self, post: &Post) -> Result<(), RepositoryError>;
            async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;
            async fn update_post(&self, update: &PostUpdate) -> Result<(), RepositoryError>;
            async fn delete_post(&self, id: &PostId, owner_id: &AccountId) -> Result<(), RepositoryError>;
            async fn list_posts(&self, page: Page) -> Result<Vec<Post>, RepositoryError>;
            async fn close(&self) -> Result<(), RepositoryError>;
        }
    }
}
