//! Client-related types shared between the client core and the backend API
//!
//! Auth request/response DTOs. Field names follow the backend wire format
//! (camelCase) via serde renames.

use serde::{Deserialize, Serialize};

use crate::models::User;

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
