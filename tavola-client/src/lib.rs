//! Tavola Client - session and access-control core
//!
//! Client-side auth for the Tavola restaurant-management app: durable
//! token storage, unverified JWT claim reads, an observable session flag,
//! role → page permission resolution and per-navigation route guarding.
//!
//! Authorization here is a UX convenience only; the backend re-checks
//! every request.

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod jwt;
pub mod permissions;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;

pub use auth::{AuthApi, AuthFlow, HttpAuthApi, LoginSuccess, LOGIN_PATH};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, GuardState, RouteGuard};
pub use permissions::{PermissionResolver, RoleInfo, UserContext};
pub use session::SessionState;
pub use storage::TokenStore;

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, LoginRequest, LoginResponse};
pub use shared::models::{RoleId, User};
