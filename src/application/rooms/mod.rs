pub mod delete_user;
pub mod get;
pub mod join;
