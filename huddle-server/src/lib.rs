pub mod gateway;
pub mod hub;

pub use gateway::{ClientRegistry, Delivery, router};
pub use hub::{Directory, DispatchError, Hub, HubCommand, RoomRegistry};
