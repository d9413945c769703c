mod connection;
mod event;
mod room;

pub use connection::ConnectionId;
pub use event::{ChatMessage, ClientEvent, ImageMessage, MessageKind, ServerEvent};
pub use room::{BROADCAST_TARGET, RESERVED_NAME};
