pub mod health;
pub mod rooms;
