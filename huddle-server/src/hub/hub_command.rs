use huddle_core::{ClientEvent, ConnectionId};

/// Commands fed to the hub actor by the transport layer.
#[derive(Debug)]
pub enum HubCommand {
    /// A decoded event from a live connection.
    Event {
        conn: ConnectionId,
        event: ClientEvent,
    },

    /// The connection's link closed. Fired exactly once per connection.
    Disconnect { conn: ConnectionId },
}
