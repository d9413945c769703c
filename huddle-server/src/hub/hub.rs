use crate::gateway::Delivery;
use crate::hub::{Directory, HubCommand, RoomRegistry};
use huddle_core::{
    BROADCAST_TARGET, ChatMessage, ClientEvent, ConnectionId, ImageMessage, MessageKind,
    ServerEvent,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Routing failure kept internal to the hub; clients never see it, the
/// affected event is dropped.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no live connection for display name '{0}'")]
    TargetOffline(String),
}

/// Join state recorded once per connection, for its whole lifetime.
#[derive(Debug)]
struct Session {
    username: String,
    room: String,
}

/// The routing actor. Owns the directory, the room registry and all
/// per-connection join state; processes commands strictly in arrival order,
/// so no other synchronization is needed.
pub struct Hub {
    directory: Directory,
    rooms: RoomRegistry,
    sessions: HashMap<ConnectionId, Session>,
    command_rx: mpsc::Receiver<HubCommand>,
    delivery: Arc<dyn Delivery>,
}

impl Hub {
    pub fn new(command_rx: mpsc::Receiver<HubCommand>, delivery: Arc<dyn Delivery>) -> Self {
        Self {
            directory: Directory::new(),
            rooms: RoomRegistry::new(),
            sessions: HashMap::new(),
            command_rx,
            delivery,
        }
    }

    pub async fn run(mut self) {
        info!("Hub event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                HubCommand::Event { conn, event } => self.handle_event(conn, event).await,
                HubCommand::Disconnect { conn } => self.handle_disconnect(conn).await,
            }
        }

        info!("Hub event loop finished");
    }

    async fn handle_event(&mut self, conn: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::CheckUsername {
                room_name,
                username,
            } => {
                let taken = self.rooms.is_name_taken(&room_name, &username);
                self.send(conn, ServerEvent::UsernameCheckResult(taken))
                    .await;
            }

            ClientEvent::Join {
                room_name,
                username,
            } => self.handle_join(conn, room_name, username).await,

            ClientEvent::Message(msg) => self.handle_message(conn, msg).await,

            ClientEvent::WebrtcOffer { target, sdp } => {
                self.relay(&target, ServerEvent::WebrtcOffer { sender: conn, sdp })
                    .await;
            }

            ClientEvent::WebrtcAnswer { target, sdp } => {
                self.relay(&target, ServerEvent::WebrtcAnswer { sender: conn, sdp })
                    .await;
            }

            ClientEvent::WebrtcIceCandidate { target, candidate } => {
                self.relay(
                    &target,
                    ServerEvent::WebrtcIceCandidate {
                        sender: conn,
                        candidate,
                    },
                )
                .await;
            }

            ClientEvent::InviteToCall {
                from,
                to,
                room_name,
            } => {
                self.relay(&to, ServerEvent::CallInvitation { from, room_name })
                    .await;
            }
        }
    }

    async fn handle_join(&mut self, conn: ConnectionId, room: String, username: String) {
        if let Some(session) = self.sessions.get(&conn) {
            warn!(
                "Connection {conn} already joined '{}' as '{}'; ignoring second join",
                session.room, session.username
            );
            return;
        }

        self.rooms.join(&room, &username);
        // Last writer wins: a name collision past the advisory checkUsername
        // silently re-binds the name to this connection.
        self.directory.register(&username, conn.clone());
        self.sessions.insert(
            conn,
            Session {
                username: username.clone(),
                room: room.clone(),
            },
        );

        info!("User {username} joined room '{room}'");
        self.broadcast_room_users(&room).await;
    }

    async fn handle_disconnect(&mut self, conn: ConnectionId) {
        let Some(session) = self.sessions.remove(&conn) else {
            // Connection closed without ever joining.
            return;
        };

        self.rooms.leave(&session.room, &session.username);
        if self.rooms.contains(&session.room) {
            self.broadcast_room_users(&session.room).await;
        }
        // Removal is by name, even if a later connection re-registered it.
        self.directory.unregister(&session.username);

        info!(
            "User {} disconnected from room '{}'",
            session.username, session.room
        );
    }

    async fn handle_message(&mut self, conn: ConnectionId, msg: ChatMessage) {
        if msg.kind == Some(MessageKind::Image) {
            self.handle_image_message(conn, msg).await
        } else {
            self.handle_text_message(conn, msg).await
        }
    }

    async fn handle_text_message(&mut self, conn: ConnectionId, msg: ChatMessage) {
        if msg.target == BROADCAST_TARGET {
            let line = format!("{}: {}", msg.sender, msg.text);
            self.broadcast(&msg.room, ServerEvent::Message(line)).await;
        } else if msg.is_public {
            // Visibility is social only: the directed message still goes to
            // the whole room.
            let line = format!(
                "{} in public talks to {}: {}",
                msg.sender, msg.target, msg.text
            );
            self.broadcast(&msg.room, ServerEvent::Message(line)).await;
        } else {
            let line = format!("{} (private): {}", msg.sender, msg.text);
            if let Err(e) = self.unicast(&msg.target, ServerEvent::Message(line)).await {
                debug!("Dropping private message: {e}");
            }
            // The sender echo goes out even when the target is offline.
            let echo = format!("You (private to {}): {}", msg.target, msg.text);
            self.send(conn, ServerEvent::Message(echo)).await;
        }
    }

    async fn handle_image_message(&mut self, conn: ConnectionId, msg: ChatMessage) {
        let image = ImageMessage {
            sender: msg.sender,
            image: msg.text,
            target: None,
        };

        if msg.target == BROADCAST_TARGET {
            self.broadcast(&msg.room, ServerEvent::ImageMessage(image))
                .await;
        } else if msg.is_public {
            let directed = ImageMessage {
                target: Some(msg.target),
                ..image
            };
            self.broadcast(&msg.room, ServerEvent::ImageMessage(directed))
                .await;
        } else {
            if let Err(e) = self
                .unicast(&msg.target, ServerEvent::ImageMessage(image.clone()))
                .await
            {
                debug!("Dropping private image: {e}");
            }
            let echo = ImageMessage {
                target: Some(msg.target),
                ..image
            };
            self.send(conn, ServerEvent::ImageMessage(echo)).await;
        }
    }

    async fn broadcast_room_users(&self, room: &str) {
        let users = self.rooms.members(room);
        self.broadcast(room, ServerEvent::RoomUsers(users)).await;
    }

    /// Unicast-only relay used for signaling events; resolution misses are
    /// dropped without notifying the sender.
    async fn relay(&self, target: &str, event: ServerEvent) {
        if let Err(e) = self.unicast(target, event).await {
            debug!("Dropping signaling event: {e}");
        }
    }

    /// Delivers `event` to every current member of `room`.
    async fn broadcast(&self, room: &str, event: ServerEvent) {
        for name in self.rooms.members(room) {
            if let Err(e) = self.unicast(&name, event.clone()).await {
                debug!("Skipping unreachable room member: {e}");
            }
        }
    }

    async fn unicast(&self, target: &str, event: ServerEvent) -> Result<(), DispatchError> {
        let conn = self
            .directory
            .resolve(target)
            .ok_or_else(|| DispatchError::TargetOffline(target.to_string()))?;
        self.delivery.send(conn, event).await;
        Ok(())
    }

    async fn send(&self, conn: ConnectionId, event: ServerEvent) {
        self.delivery.send(conn, event).await;
    }
}
