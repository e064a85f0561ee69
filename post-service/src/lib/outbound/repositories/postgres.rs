use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::errors::RepositoryError;
use crate::domain::ports::Repository;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostUpdate;

pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: PgRow) -> Result<Account, RepositoryError> {
        let id: Uuid = row.try_get("id").map_err(storage_error)?;
        let email: String = row.try_get("email").map_err(storage_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(storage_error)?;

        Ok(Account {
            id: AccountId(id),
            email: EmailAddress::new(email)
                .map_err(|e| RepositoryError::Storage(format!("Corrupt account row: {}", e)))?,
            password_hash,
        })
    }

    fn row_to_post(row: PgRow) -> Result<Post, RepositoryError> {
        let id: Uuid = row.try_get("id").map_err(storage_error)?;
        let owner_id: Uuid = row.try_get("owner_id").map_err(storage_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage_error)?;

        Ok(Post {
            id: PostId(id),
            owner_id: AccountId(owner_id),
            title: row.try_get("title").map_err(storage_error)?,
            content: row.try_get("content").map_err(storage_error)?,
            created_at,
        })
    }
}

fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn insert_account(&self, account: &Account) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict(match db_err.constraint() {
                        Some("accounts_email_key") => {
                            format!("email {} already registered", account.email)
                        }
                        _ => format!("account {} already exists", account.id),
                    });
                }
            }
            storage_error(e)
        })?;

        Ok(())
    }

    async fn get_account_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        sqlx::query(
            r#"
            SELECT id, email, password_hash
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .map(Self::row_to_account)
        .transpose()
    }

    async fn get_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError> {
        sqlx::query(
            r#"
            SELECT id, email, password_hash
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .map(Self::row_to_account)
        .transpose()
    }

    async fn insert_post(&self, post: &Post) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, owner_id, title, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.id.0)
        .bind(post.owner_id.0)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        sqlx::query(
            r#"
            SELECT id, owner_id, title, content, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .map(Self::row_to_post)
        .transpose()
    }

    async fn update_post(&self, update: &PostUpdate) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3, content = $4
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(update.id.0)
        .bind(update.owner_id.0)
        .bind(&update.title)
        .bind(&update.content)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        tracing::debug!(
            post_id = %update.id,
            rows_affected = result.rows_affected(),
            "Post update applied"
        );

        Ok(())
    }

    async fn delete_post(&self, id: &PostId, owner_id: &AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner_id.0)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        tracing::debug!(
            post_id = %id,
            rows_affected = result.rows_affected(),
            "Post delete applied"
        );

        Ok(())
    }

    async fn list_posts(&self, page: Page) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, content, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.size() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn close(&self) -> Result<(), RepositoryError> {
        if self.pool.is_closed() {
            return Err(RepositoryError::Closed);
        }
        self.pool.close().await;
        tracing::info!(backend = "postgresql", "Repository closed");
        Ok(())
    }
}
