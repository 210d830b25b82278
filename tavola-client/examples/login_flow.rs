//! Login → guard → logout walkthrough against a canned auth endpoint
//!
//! ```bash
//! cargo run --example login_flow -p tavola-client
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tavola_client::{
    ApiResponse, AuthApi, AuthFlow, ClientResult, LoginRequest, LoginResponse, RoleId, RouteGuard,
    TokenStore, User,
};

/// Stand-in for the backend login endpoint
struct DemoApi;

#[async_trait]
impl AuthApi for DemoApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<ApiResponse<LoginResponse>> {
        if request.password != "hunter2" {
            return Ok(ApiResponse::error(401, "Invalid credentials"));
        }

        let user = User {
            id: "u-100".to_string(),
            user_name: "asilva".to_string(),
            email: request.email.clone(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            roles: vec!["Chef".to_string()],
            role_id: Some(RoleId::Chef.as_id()),
            restaurant_id: Some("r-200".to_string()),
        };

        Ok(ApiResponse::ok(LoginResponse {
            user,
            access_token: demo_token(RoleId::Chef),
            refresh_token: demo_token(RoleId::Chef),
        }))
    }
}

/// Mint a structurally valid token the way the backend would
fn demo_token(role: RoleId) -> String {
    let claims = tavola_client::jwt::Claims {
        user_id: Some("u-100".to_string()),
        email: Some("a.silva@example.com".to_string()),
        restaurant_id: Some("r-200".to_string()),
        role: Some(role.as_id().to_string()),
        exp: Some(shared::util::now_secs() + 3600),
        iss: Some("tavola-api".to_string()),
        aud: Some("tavola-app".to_string()),
    };
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("serialize claims"));
    format!("{header}.{payload}.demo")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tavola_client=debug".into()),
        )
        .init();

    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(TokenStore::load(dir.path()));
    let flow = Arc::new(AuthFlow::new(Arc::new(DemoApi), store));
    let guard = RouteGuard::new(flow.clone());

    flow.startup_check();
    println!("before login: /orders -> {:?}", guard.evaluate("/orders"));

    let outcome = flow
        .login(
            LoginRequest {
                email: "a.silva@example.com".to_string(),
                password: "hunter2".to_string(),
            },
            None,
        )
        .await
        .expect("login");
    println!(
        "logged in as {} -> destination {}",
        outcome.user.display_name(),
        outcome.destination
    );

    for path in ["/kitchen", "/orders", "/dashboard", "/reports", "/tables/5"] {
        println!("{path} -> {:?}", guard.evaluate(path));
    }

    let login_path = flow.logout();
    println!("after logout: redirected to {login_path}");
    println!("/kitchen -> {:?}", guard.evaluate("/kitchen"));
}
