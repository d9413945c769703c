use crate::gateway::ClientRegistry;
use crate::hub::HubCommand;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientEvent, ConnectionId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(registry): State<ClientRegistry>,
) -> impl IntoResponse {
    let conn = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, conn, registry))
}

async fn handle_socket(socket: WebSocket, conn: ConnectionId, registry: ClientRegistry) {
    info!("New WebSocket connection: {conn}");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    registry.add_client(conn.clone(), tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let registry = registry.clone();
        let conn = conn.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            let cmd = HubCommand::Event {
                                conn: conn.clone(),
                                event,
                            };
                            if let Err(e) = registry.hub_cmd_tx.send(cmd).await {
                                error!("Hub died: {e}");
                                break;
                            }
                        }
                        // Malformed frames are recoverable: drop the event,
                        // keep the connection.
                        Err(e) => warn!("Invalid event from {conn}: {e:?}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Runs once per connection whichever side closed first.
    let _ = registry
        .hub_cmd_tx
        .send(HubCommand::Disconnect { conn: conn.clone() })
        .await;

    registry.remove_client(&conn);
    info!("WebSocket disconnected: {conn}");
}
