use huddle_core::RESERVED_NAME;
use std::collections::{HashMap, HashSet};

/// Tracks which display names are joined to which room.
///
/// A room exists exactly while it has members: the entry is created on the
/// first `join` and deleted inside `leave` once the member set empties.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, HashSet<String>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisory pre-join check; not atomic with the join that follows it.
    pub fn is_name_taken(&self, room: &str, name: &str) -> bool {
        name == RESERVED_NAME
            || self
                .rooms
                .get(room)
                .is_some_and(|members| members.contains(name))
    }

    /// Adds `name` to `room`, creating the room if needed. Idempotent.
    pub fn join(&mut self, room: &str, name: &str) {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Removes `name` from `room`; deletes the room once no members remain.
    /// No-op if the room or the name is absent.
    pub fn leave(&mut self, room: &str, name: &str) {
        let Some(members) = self.rooms.get_mut(room) else {
            return;
        };
        members.remove(name);
        if members.is_empty() {
            self.rooms.remove(room);
        }
    }

    /// Snapshot of current members, in set iteration order. Callers may rely
    /// on set equality only, not on ordering.
    pub fn members(&self, room: &str) -> Vec<String> {
        self.rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }
}
