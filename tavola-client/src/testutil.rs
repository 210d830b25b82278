//! Shared test fixtures

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use shared::client::{ApiResponse, LoginRequest, LoginResponse};
use shared::models::{RoleId, User};
use tempfile::TempDir;

use crate::auth::{AuthApi, AuthFlow};
use crate::error::ClientResult;
use crate::jwt::Claims;
use crate::permissions::PermissionResolver;
use crate::storage::TokenStore;

pub(crate) fn claims_for(role: RoleId, exp: i64) -> Claims {
    Claims {
        user_id: Some("u-100".to_string()),
        email: Some("m.rossi@example.com".to_string()),
        restaurant_id: Some("r-200".to_string()),
        role: Some(role.as_id().to_string()),
        exp: Some(exp),
        iss: Some("tavola-api".to_string()),
        aud: Some("tavola-app".to_string()),
    }
}

/// Build a structurally valid token; the signature is never inspected
/// client-side.
pub(crate) fn unsigned_token(claims: &Claims) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).expect("serialize claims"));
    format!("{header}.{payload}.sig")
}

pub(crate) fn sample_user() -> User {
    User {
        id: "u-100".to_string(),
        user_name: "mrossi".to_string(),
        email: "m.rossi@example.com".to_string(),
        first_name: "Mario".to_string(),
        last_name: "Rossi".to_string(),
        roles: vec!["Manager".to_string()],
        role_id: Some(3),
        restaurant_id: Some("r-200".to_string()),
    }
}

pub(crate) fn store_without_tokens() -> (TempDir, Arc<TokenStore>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(TokenStore::load(dir.path()));
    (dir, store)
}

pub(crate) fn store_with_role(role: RoleId, exp: i64) -> (TempDir, Arc<TokenStore>) {
    let (dir, store) = store_without_tokens();
    store.save_tokens(
        &unsigned_token(&claims_for(role, exp)),
        "refresh.opaque.value",
    );
    (dir, store)
}

pub(crate) fn resolver_with_role(role: RoleId, exp: i64) -> (TempDir, PermissionResolver) {
    let (dir, store) = store_with_role(role, exp);
    (dir, PermissionResolver::new(store))
}

/// Canned [`AuthApi`] returning a fixed envelope, optionally delayed
pub(crate) struct StubApi {
    envelope: ApiResponse<LoginResponse>,
    delay_ms: u64,
}

impl StubApi {
    pub(crate) fn new(envelope: ApiResponse<LoginResponse>) -> Self {
        Self {
            envelope,
            delay_ms: 0,
        }
    }

    pub(crate) fn rejecting() -> Self {
        Self::new(ApiResponse::error(401, "Invalid credentials"))
    }

    pub(crate) fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[async_trait]
impl AuthApi for StubApi {
    async fn login(&self, _request: &LoginRequest) -> ClientResult<ApiResponse<LoginResponse>> {
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        Ok(self.envelope.clone())
    }
}

pub(crate) fn auth_with_store(store: Arc<TokenStore>) -> Arc<AuthFlow> {
    Arc::new(AuthFlow::new(Arc::new(StubApi::rejecting()), store))
}
