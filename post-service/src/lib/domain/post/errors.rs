use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for page requests
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page size must be greater than zero")]
    ZeroSize,

    #[error("Page {0} is out of range")]
    OutOfRange(u64),
}

/// Top-level error for post operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Account does not exist: {0}")]
    UnknownOwner(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
