use crate::model::connection::ConnectionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events arriving from a client, framed as `{"event": ..., "data": ...}`.
///
/// Event and field names are the wire contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "checkUsername", rename_all = "camelCase")]
    CheckUsername { room_name: String, username: String },

    #[serde(rename = "join", rename_all = "camelCase")]
    Join { room_name: String, username: String },

    #[serde(rename = "message")]
    Message(ChatMessage),

    /// SDP offer relayed verbatim to the target's connection.
    #[serde(rename = "webrtc_offer")]
    WebrtcOffer { target: String, sdp: Value },

    #[serde(rename = "webrtc_answer")]
    WebrtcAnswer { target: String, sdp: Value },

    #[serde(rename = "webrtc_ice_candidate")]
    WebrtcIceCandidate { target: String, candidate: Value },

    #[serde(rename = "invite-to-call", rename_all = "camelCase")]
    InviteToCall {
        from: String,
        to: String,
        room_name: String,
    },
}

/// Events pushed from the hub to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "usernameCheckResult")]
    UsernameCheckResult(bool),

    /// Full member list of a room, sent on every membership change.
    #[serde(rename = "roomUsers")]
    RoomUsers(Vec<String>),

    /// Pre-formatted chat line.
    #[serde(rename = "message")]
    Message(String),

    #[serde(rename = "imageMessage")]
    ImageMessage(ImageMessage),

    /// `sender` is the connection id of the offering peer.
    #[serde(rename = "webrtc_offer")]
    WebrtcOffer { sender: ConnectionId, sdp: Value },

    #[serde(rename = "webrtc_answer")]
    WebrtcAnswer { sender: ConnectionId, sdp: Value },

    #[serde(rename = "webrtc_ice_candidate")]
    WebrtcIceCandidate {
        sender: ConnectionId,
        candidate: Value,
    },

    #[serde(rename = "call-invitation", rename_all = "camelCase")]
    CallInvitation { from: String, room_name: String },
}

/// Inbound chat payload. For image messages (`type: "image"`) the `text`
/// field carries the base64 image data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub target: String,
    pub room: String,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
}

/// Outbound image payload. `target` is present only for the public-directed
/// variant and the private echo to the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMessage {
    pub sender: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}
