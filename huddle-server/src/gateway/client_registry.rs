use crate::gateway::Delivery;
use crate::hub::HubCommand;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use huddle_core::{ConnectionId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct RegistryInner {
    clients: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Tracks the outbound frame channel of every live WebSocket connection and
/// turns [`ServerEvent`]s into JSON text frames.
#[derive(Clone)]
pub struct ClientRegistry {
    inner: Arc<RegistryInner>,
    pub(crate) hub_cmd_tx: mpsc::Sender<HubCommand>,
}

impl ClientRegistry {
    pub fn new(hub_cmd_tx: mpsc::Sender<HubCommand>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                clients: DashMap::new(),
            }),
            hub_cmd_tx,
        }
    }

    pub fn add_client(&self, conn: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.clients.insert(conn, tx);
    }

    pub fn remove_client(&self, conn: &ConnectionId) {
        self.inner.clients.remove(conn);
    }

    pub fn send_event(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(client) = self.inner.clients.get(&conn) {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if let Err(e) = client.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {conn}: {e:?}");
                    }
                }
                Err(e) => error!("Failed to serialize event: {e}"),
            }
        } else {
            warn!("Attempted to send event to disconnected client {conn}");
        }
    }
}

#[async_trait]
impl Delivery for ClientRegistry {
    async fn send(&self, conn: ConnectionId, event: ServerEvent) {
        self.send_event(conn, event);
    }
}
