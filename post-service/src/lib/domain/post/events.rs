use uuid::Uuid;

use crate::domain::post::models::Post;

/// Domain event emitted after a post is persisted.
///
/// Carries a snapshot of the post for real-time subscribers.
#[derive(Debug, Clone)]
pub struct PostCreatedEvent {
    pub event_id: String,
    pub post: Post,
}

impl PostCreatedEvent {
    pub fn new(post: &Post) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            post: post.clone(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        "post_created"
    }
}
