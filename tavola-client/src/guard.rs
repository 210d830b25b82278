//! RouteGuard - per-navigation access control
//!
//! Classifies every navigation attempt into an explicit state, then maps
//! it to a tagged decision the router executes. Nothing is cached between
//! navigations: a role change in a swapped token takes effect on the very
//! next route change.

use std::sync::Arc;

use crate::auth::{AuthFlow, LOGIN_PATH};
use crate::permissions::PermissionResolver;

const DASHBOARD_PAGE: &str = "dashboard";

/// Classification of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// No valid session - send to login, remembering where the user was going
    Unauthenticated { return_url: String },
    /// Root/dashboard requested but the role lands elsewhere
    AuthenticatedRootRedirect { default_page: &'static str },
    /// Page outside the role's permission set
    AuthenticatedNoAccess {
        page: String,
        default_page: &'static str,
    },
    /// Navigation may proceed unchanged
    Allowed,
}

/// Decision handed to the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectTo(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Route guard evaluated on every navigation
pub struct RouteGuard {
    auth: Arc<AuthFlow>,
    resolver: PermissionResolver,
}

impl RouteGuard {
    pub fn new(auth: Arc<AuthFlow>) -> Self {
        let resolver = auth.resolver().clone();
        Self { auth, resolver }
    }

    /// Classify a requested path
    ///
    /// Checked in order: session validity (recomputed live, so a
    /// mid-session expiry purges storage here), the root-redirect rule,
    /// then page permission.
    pub fn classify(&self, path: &str) -> GuardState {
        if !self.auth.is_logged_in() {
            return GuardState::Unauthenticated {
                return_url: path.to_string(),
            };
        }

        let route = path.split_once('?').map_or(path, |(route, _query)| route);
        let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
        let page = segments.first().copied().unwrap_or(DASHBOARD_PAGE);

        // Root and bare /dashboard land on the role's own default page
        if segments.is_empty() || (page == DASHBOARD_PAGE && segments.len() == 1) {
            let default_page = self.resolver.default_page();
            if default_page != DASHBOARD_PAGE {
                return GuardState::AuthenticatedRootRedirect { default_page };
            }
        }

        if !self.resolver.can_access(page) {
            return GuardState::AuthenticatedNoAccess {
                page: page.to_string(),
                default_page: self.resolver.default_page(),
            };
        }

        GuardState::Allowed
    }

    /// Evaluate a navigation attempt and return the routing decision
    pub fn evaluate(&self, path: &str) -> GuardDecision {
        match self.classify(path) {
            GuardState::Unauthenticated { return_url } => {
                tracing::debug!(path, "Unauthenticated navigation, redirecting to login");
                GuardDecision::RedirectTo(format!("{}?returnUrl={}", LOGIN_PATH, return_url))
            }
            GuardState::AuthenticatedRootRedirect { default_page } => {
                tracing::debug!(path, default_page, "Root redirect to role default page");
                GuardDecision::RedirectTo(format!("/{}", default_page))
            }
            GuardState::AuthenticatedNoAccess { page, default_page } => {
                tracing::warn!(path, page, "Unauthorized page access attempt");
                GuardDecision::RedirectTo(format!("/{}", default_page))
            }
            GuardState::Allowed => GuardDecision::Allow,
        }
    }
}
