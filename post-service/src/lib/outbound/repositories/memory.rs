use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::errors::RepositoryError;
use crate::domain::ports::Repository;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;

#[derive(Default)]
struct Store {
    accounts: HashMap<AccountId, Account>,
    /// email -> account id
    emails: HashMap<String, AccountId>,
    posts: HashMap<PostId, Post>,
}

/// Process-local repository, selected with a `memory://` database url.
///
/// Nothing survives a restart. Used for development and black-box tests.
#[derive(Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
    closed: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), RepositoryError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RepositoryError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_account(&self, account: &Account) -> Result<(), RepositoryError> {
        self.ensure_open()?;
        let mut store = self.store.write().await;

        if store.emails.contains_key(account.email.as_str()) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                account.email
            )));
        }
        if store.accounts.contains_key(&account.id) {
            return Err(RepositoryError::Conflict(format!(
                "account {} already exists",
                account.id
            )));
        }

        store
            .emails
            .insert(account.email.as_str().to_string(), account.id);
        store.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn get_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        self.ensure_open()?;
        Ok(self.store.read().await.accounts.get(id).cloned())
    }

    async fn get_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError> {
        self.ensure_open()?;
        let store = self.store.read().await;
        Ok(store
            .emails
            .get(email.as_str())
            .and_then(|id| store.accounts.get(id))
            .cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<(), RepositoryError> {
        self.ensure_open()?;
        let mut store = self.store.write().await;

        if store.posts.contains_key(&post.id) {
            return Err(RepositoryError::Conflict(format!(
                "post {} already exists",
                post.id
            )));
        }

        store.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        self.ensure_open()?;
        Ok(self.store.read().await.posts.get(id).cloned())
    }

    async fn update_post(&self, update: &PostUpdate) -> Result<(), RepositoryError> {
        self.ensure_open()?;
        let mut store = self.store.write().await;

        if let Some(post) = store
            .posts
            .get_mut(&update.id)
            .filter(|post| post.owner_id == update.owner_id)
        {
            post.title = update.title.clone();
            post.content = update.content.clone();
        }
        Ok(())
    }

    async fn delete_post(&self, id: &PostId, owner_id: &AccountId) -> Result<(), RepositoryError> {
        self.ensure_open()?;
        let mut store = self.store.write().await;

        let owned = store
            .posts
            .get(id)
            .is_some_and(|post| post.owner_id == *owner_id);
        if owned {
            store.posts.remove(id);
        }
        Ok(())
    }

    async fn list_posts(&self, page: Page) -> Result<Vec<Post>, RepositoryError> {
        self.ensure_open()?;
        let store = self.store.read().await;

        let mut posts: Vec<&Post> = store.posts.values().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .cloned()
            .collect())
    }

    async fn close(&self) -> Result<(), RepositoryError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(RepositoryError::Closed);
        }
        tracing::info!(backend = "memory", "Repository closed");
        Ok(())
    }
}
