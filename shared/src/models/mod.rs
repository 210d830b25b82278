//! Data models shared across crates

pub mod role;
pub mod user;

pub use role::{InvalidRoleId, RoleId};
pub use user::User;
