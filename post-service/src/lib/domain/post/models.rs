use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::post::errors::PageError;
use crate::domain::post::errors::PostIdError;

/// Post aggregate.
///
/// `id`, `owner_id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub owner_id: AccountId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Post unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new time-ordered post ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Owner-scoped change to a post's mutable fields.
///
/// Applied only where both `id` and `owner_id` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub id: PostId,
    pub owner_id: AccountId,
    pub title: String,
    pub content: String,
}

/// One page of the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Create a page request.
    ///
    /// # Arguments
    /// * `number` - Zero-based page number
    /// * `size` - Posts per page
    ///
    /// # Errors
    /// * `ZeroSize` - Page size is zero
    /// * `OutOfRange` - Offset does not fit in a signed 64-bit integer
    pub fn new(number: u64, size: u64) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::ZeroSize);
        }

        match number.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => Ok(Self { number, size }),
            _ => Err(PageError::OutOfRange(number)),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of posts preceding this page.
    pub fn offset(&self) -> u64 {
        self.number * self.size
    }
}

/// Command to create a post; the owner comes from the verified token.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
}

/// Command to replace a post's title and content.
#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        let page = Page::new(3, 10).unwrap();
        assert_eq!(page.offset(), 30);
        assert_eq!(Page::new(0, 10).unwrap().offset(), 0);
    }

    #[test]
    fn test_page_rejects_zero_size() {
        assert_eq!(Page::new(1, 0), Err(PageError::ZeroSize));
    }

    #[test]
    fn test_page_rejects_overflowing_offset() {
        assert_eq!(Page::new(u64::MAX, 10), Err(PageError::OutOfRange(u64::MAX)));
        assert!(Page::new(i64::MAX as u64 / 10 + 1, 10).is_err());
    }

    #[test]
    fn test_post_id_parse() {
        let id = PostId::new();
        assert_eq!(PostId::from_string(&id.to_string()).unwrap(), id);
        assert!(PostId::from_string("42").is_err());
    }
}
