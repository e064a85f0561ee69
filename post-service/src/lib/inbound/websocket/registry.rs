use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message as WsMessage;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Manages all active WebSocket connections.
///
/// Every connection receives every broadcast; there are no rooms.
#[derive(Debug, Clone)]
pub struct ConnectionRegistry {
    connections: Arc<RwLock<HashMap<Uuid, mpsc::UnboundedSender<WsMessage>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn add_connection(&self, connection_id: Uuid, sender: mpsc::UnboundedSender<WsMessage>) {
        self.connections.write().await.insert(connection_id, sender);
        tracing::info!(connection_id = %connection_id, "Connection added");
    }

    pub async fn remove_connection(&self, connection_id: Uuid) {
        if self.connections.write().await.remove(&connection_id).is_some() {
            tracing::info!(connection_id = %connection_id, "Connection removed");
        }
    }

    /// Queue a message on every open connection.
    ///
    /// Returns the number of connections the message was handed to. Senders
    /// whose receiving task is gone are pruned.
    pub async fn broadcast(&self, message: WsMessage) -> usize {
        let mut stale = Vec::new();
        let mut sent_count = 0;

        {
            let connections = self.connections.read().await;
            for (connection_id, sender) in connections.iter() {
                if sender.send(message.clone()).is_ok() {
                    sent_count += 1;
                } else {
                    tracing::warn!(connection_id = %connection_id, "Failed to send message to connection");
                    stale.push(*connection_id);
                }
            }
        }

        if !stale.is_empty() {
            let mut connections = self.connections.write().await;
            for connection_id in &stale {
                connections.remove(connection_id);
            }
        }

        tracing::debug!(sent = sent_count, failed = stale.len(), "Broadcast completed");
        sent_count
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
