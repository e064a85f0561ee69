use thiserror::Error;

/// Error surfaced by a repository implementation.
///
/// No transient/permanent classification exists: callers never retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Repository is closed")]
    Closed,
}

/// Error for real-time notification delivery.
///
/// Never propagated to the request that triggered the notification.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to serialize notification: {0}")]
    SerializationFailed(String),

    #[error("Failed to deliver notification: {0}")]
    DeliveryFailed(String),
}
