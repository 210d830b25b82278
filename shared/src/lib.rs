//! Shared types for the Tavola client framework
//!
//! Common types used across crates: API response envelopes, auth DTOs,
//! user/role models and small utility helpers.

pub mod client;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse};
pub use models::{RoleId, User};
pub use response::ApiResponse;
