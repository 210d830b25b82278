//! API Response types
//!
//! Response envelope used by the Tavola backend API.

use serde::{Deserialize, Serialize};

/// Unified API response envelope
///
/// All backend responses follow this format:
/// ```json
/// {
///     "isSuccess": true,
///     "message": "Success",
///     "statusCode": 200,
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub is_success: bool,
    /// Human-readable message
    pub message: String,
    /// HTTP-style status code echoed in the body
    pub status_code: u16,
    /// Response data (absent on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            is_success: true,
            message: "Success".to_string(),
            status_code: 200,
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            status_code,
            data: None,
        }
    }
}
