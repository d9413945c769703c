use async_trait::async_trait;
use huddle_core::{ConnectionId, ServerEvent};

/// Outbound seam between the hub and the transport layer.
///
/// Delivery is best effort: implementations log failures and never surface
/// them to the hub.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn send(&self, conn: ConnectionId, event: ServerEvent);
}
