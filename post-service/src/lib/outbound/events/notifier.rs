use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::Message as WsMessage;

use crate::domain::errors::NotifierError;
use crate::domain::post::events::PostCreatedEvent;
use crate::domain::post::ports::PostNotifier;
use crate::inbound::websocket::messages::ServerMessage;
use crate::inbound::websocket::messages::WsPost;
use crate::inbound::websocket::ConnectionRegistry;

/// Pushes post events to every connected WebSocket client of this process.
pub struct WebsocketNotifier {
    registry: Arc<ConnectionRegistry>,
}

impl WebsocketNotifier {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl PostNotifier for WebsocketNotifier {
    async fn post_created(&self, event: &PostCreatedEvent) -> Result<(), NotifierError> {
        let message = ServerMessage::PostCreated(WsPost::from(&event.post));
        let json = serde_json::to_string(&message)
            .map_err(|e| NotifierError::SerializationFailed(e.to_string()))?;

        let delivered = self.registry.broadcast(WsMessage::Text(json)).await;

        tracing::debug!(
            event_id = %event.event_id,
            event_type = event.event_type(),
            post_id = %event.post.id,
            delivered,
            "Post event broadcast"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::account::models::AccountId;
    use crate::domain::post::models::Post;
    use crate::domain::post::models::PostId;

    #[tokio::test]
    async fn test_post_created_is_broadcast_as_json() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.add_connection(Uuid::new_v4(), tx).await;
        let notifier = WebsocketNotifier::new(Arc::clone(&registry));

        let post = Post {
            id: PostId::new(),
            owner_id: AccountId::new(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            created_at: Utc::now(),
        };
        notifier
            .post_created(&PostCreatedEvent::new(&post))
            .await
            .unwrap();

        let Some(WsMessage::Text(text)) = rx.recv().await else {
            panic!("expected a text frame");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "post_created");
        assert_eq!(value["payload"]["id"], post.id.to_string());
    }

    #[tokio::test]
    async fn test_no_subscribers_is_not_an_error() {
        let notifier = WebsocketNotifier::new(Arc::new(ConnectionRegistry::new()));
        let post = Post {
            id: PostId::new(),
            owner_id: AccountId::new(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            created_at: Utc::now(),
        };

        assert!(notifier.post_created(&PostCreatedEvent::new(&post)).await.is_ok());
    }
}
