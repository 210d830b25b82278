//! AuthFlow - login/logout orchestration
//!
//! Drives the session lifecycle: credential submission through the
//! [`AuthApi`] seam, token/user persistence, session-flag updates and the
//! post-login destination. Navigation is returned as a value, never
//! performed as a side effect.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use shared::client::{ApiResponse, LoginRequest, LoginResponse};
use shared::models::User;
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::jwt;
use crate::permissions::PermissionResolver;
use crate::session::SessionState;
use crate::storage::TokenStore;

/// Login page path; guard redirects carry the original path as returnUrl
pub const LOGIN_PATH: &str = "/auth/login";

const ROOT_PATH: &str = "/";
const DASHBOARD_PATH: &str = "/dashboard";

/// Auth endpoint seam
///
/// Production uses [`HttpAuthApi`]; tests substitute their own.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit credentials to the login endpoint
    async fn login(&self, request: &LoginRequest) -> ClientResult<ApiResponse<LoginResponse>>;
}

/// HTTP implementation of [`AuthApi`] against the Tavola backend
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Create a new API client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<ApiResponse<LoginResponse>> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;

        // Rejected logins come back with an error status but still carry
        // the envelope; prefer its message over a bare status code.
        let status = response.status();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<ApiResponse<LoginResponse>>(&bytes) {
            Ok(envelope) => Ok(envelope),
            Err(_) if status == reqwest::StatusCode::UNAUTHORIZED => {
                Err(ClientError::Unauthorized)
            }
            Err(e) => Err(ClientError::InvalidResponse(e.to_string())),
        }
    }
}

/// Successful login outcome
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub user: User,
    /// Where the router should go next
    pub destination: String,
}

/// Session lifecycle orchestrator
///
/// Owns the [`SessionState`] flag (single writer) and is the only
/// component that mutates the [`TokenStore`].
pub struct AuthFlow {
    api: Arc<dyn AuthApi>,
    store: Arc<TokenStore>,
    session: SessionState,
    resolver: PermissionResolver,
    login_in_flight: AtomicBool,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<TokenStore>) -> Self {
        let resolver = PermissionResolver::new(store.clone());
        Self {
            api,
            store,
            session: SessionState::new(),
            resolver,
            login_in_flight: AtomicBool::new(false),
        }
    }

    /// Wire up the production stack from configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        let api = Arc::new(HttpAuthApi::new(config));
        let store = Arc::new(TokenStore::load(&config.storage_dir));
        Self::new(api, store)
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    pub fn resolver(&self) -> &PermissionResolver {
        &self.resolver
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Subscribe to session-state changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.session.subscribe()
    }

    /// Submit credentials and establish a session
    ///
    /// `return_url` is the path captured by the pre-login redirect, if
    /// any. Refuses re-entry while an attempt is in flight.
    pub async fn login(
        &self,
        credentials: LoginRequest,
        return_url: Option<&str>,
    ) -> ClientResult<LoginSuccess> {
        if self.login_in_flight.swap(true, Ordering::SeqCst) {
            return Err(ClientError::LoginInFlight);
        }

        let result = self.login_inner(credentials, return_url).await;
        self.login_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn login_inner(
        &self,
        credentials: LoginRequest,
        return_url: Option<&str>,
    ) -> ClientResult<LoginSuccess> {
        let envelope = self.api.login(&credentials).await?;

        if !envelope.is_success {
            tracing::warn!(status = envelope.status_code, "Login rejected by server");
            return Err(ClientError::LoginRejected(envelope.message));
        }
        let data = envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing login data".to_string()))?;

        self.store.save_tokens(&data.access_token, &data.refresh_token);
        self.store.save_user(&data.user);
        self.session.set(true);
        tracing::info!(user = %data.user.user_name, "Login successful");

        // An explicit non-root destination wins over the role default
        let destination = match return_url {
            Some(url) if !url.is_empty() && url != ROOT_PATH && url != DASHBOARD_PATH => {
                url.to_string()
            }
            _ => format!("/{}", self.resolver.default_page()),
        };

        Ok(LoginSuccess {
            user: data.user,
            destination,
        })
    }

    /// Tear down the session. Idempotent; returns the login path for the
    /// router.
    pub fn logout(&self) -> &'static str {
        self.store.clear_all();
        self.session.set(false);
        tracing::info!("Logged out");
        LOGIN_PATH
    }

    /// Live session check
    ///
    /// Recomputed from storage on every call and published to the
    /// session flag. A detected expiry purges the stored session.
    pub fn is_logged_in(&self) -> bool {
        let authenticated = match self.store.tokens() {
            (Some(access), Some(_refresh)) => {
                if jwt::is_expired(&access) {
                    tracing::warn!("Access token expired, clearing session");
                    self.store.clear_all();
                    false
                } else {
                    true
                }
            }
            _ => false,
        };

        self.session.set(authenticated);
        authenticated
    }

    /// Process-init check: sweep corrupted storage, then re-derive the
    /// session flag from whatever survives (covers page reloads).
    pub fn startup_check(&self) {
        if self.store.clear_if_corrupted() {
            self.session.set(false);
            return;
        }
        self.is_logged_in();
    }
}
