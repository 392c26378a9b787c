#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

pub mod rooms_delete_user_test;
