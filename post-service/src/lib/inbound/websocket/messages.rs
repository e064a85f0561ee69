//! Messages pushed to real-time subscribers.
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::post::models::Post;

/// Post snapshot as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WsPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for WsPost {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            user_id: post.owner_id.0,
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at,
        }
    }
}

/// Server to client messages.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    PostCreated(WsPost),
}
