use huddle_core::ConnectionId;
use std::collections::HashMap;

/// Maps a display name to the connection currently using it.
///
/// Registration is last-writer-wins: a second `register` for the same name
/// silently replaces the first mapping, and `unregister` removes by name
/// regardless of which connection registered it. Owned exclusively by the
/// [`Hub`](crate::hub::Hub) actor, which serializes all access.
#[derive(Debug, Default)]
pub struct Directory {
    entries: HashMap<String, ConnectionId>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `conn`, replacing any existing mapping.
    pub fn register(&mut self, name: &str, conn: ConnectionId) {
        self.entries.insert(name.to_string(), conn);
    }

    pub fn resolve(&self, name: &str) -> Option<ConnectionId> {
        self.entries.get(name).cloned()
    }

    /// Removes the mapping for `name` if present; no-op otherwise.
    pub fn unregister(&mut self, name: &str) {
        self.entries.remove(name);
    }
}
