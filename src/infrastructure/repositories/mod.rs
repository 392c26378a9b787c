pub mod mock;
pub mod rooms;
