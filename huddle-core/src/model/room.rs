/// Display name reported as always taken; it would collide with the
/// broadcast sentinel on the client side.
pub const RESERVED_NAME: &str = "Todos";

/// Sentinel message target meaning "every member of the room".
pub const BROADCAST_TARGET: &str = "for all";
