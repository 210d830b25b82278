//! Role catalog and permission resolution
//!
//! Page-level RBAC: each role maps to the ordered set of pages it may
//! view and a default landing page. The catalog is static configuration;
//! [`PermissionResolver`] answers queries for whatever role the stored
//! access token currently carries.

use std::sync::Arc;

use shared::models::RoleId;

use crate::jwt;
use crate::storage::TokenStore;

/// Landing page for unauthenticated or undetermined users
///
/// The most restricted page, not an error screen.
pub const GUEST_FALLBACK_PAGE: &str = "menu";

/// Static role metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInfo {
    pub name: &'static str,
    pub description: &'static str,
}

// ========== Role catalog (static, process-wide) ==========

const DEVELOP_PAGES: &[&str] = &[
    "dashboard",
    "restaurants",
    "users",
    "reports",
    "settings",
    "system-management",
];

const ADMIN_PAGES: &[&str] = &[
    "dashboard",
    "orders",
    "menu",
    "users",
    "reports",
    "settings",
    "tables",
];

const MANAGER_PAGES: &[&str] = &[
    "dashboard",
    "orders",
    "menu",
    "reports",
    "tables",
    "inventory",
];

const EMPLOYEE_PAGES: &[&str] = &["orders", "tables", "menu"];

const CHEF_PAGES: &[&str] = &["kitchen", "orders", "menu"];

const GUEST_PAGES: &[&str] = &["menu", "cart", "orders"];

/// Pages a role may view, in navigation order
pub fn pages_for(role: RoleId) -> &'static [&'static str] {
    match role {
        RoleId::Develop => DEVELOP_PAGES,
        RoleId::Admin => ADMIN_PAGES,
        RoleId::Manager => MANAGER_PAGES,
        RoleId::Employee => EMPLOYEE_PAGES,
        RoleId::Chef => CHEF_PAGES,
        RoleId::Guest => GUEST_PAGES,
    }
}

/// Default landing page for a role
pub fn default_page_for(role: RoleId) -> &'static str {
    match role {
        RoleId::Develop | RoleId::Admin | RoleId::Manager => "dashboard",
        RoleId::Employee => "orders",
        RoleId::Chef => "kitchen",
        RoleId::Guest => "menu",
    }
}

/// Display metadata for a role
pub fn describe(role: RoleId) -> RoleInfo {
    match role {
        RoleId::Develop => RoleInfo {
            name: "Developer",
            description: "System developer with full access to all restaurants and management features",
        },
        RoleId::Admin => RoleInfo {
            name: "Admin",
            description: "Restaurant administrator with full access to restaurant management",
        },
        RoleId::Manager => RoleInfo {
            name: "Manager",
            description: "Restaurant manager with operational access",
        },
        RoleId::Employee => RoleInfo {
            name: "Employee",
            description: "Restaurant employee with limited access",
        },
        RoleId::Chef => RoleInfo {
            name: "Chef",
            description: "Kitchen chef with menu and order management access",
        },
        RoleId::Guest => RoleInfo {
            name: "Guest",
            description: "Customer guest with ordering access via QR code",
        },
    }
}

// ========== Resolver ==========

/// Identity snapshot derived from the current access token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserContext {
    pub user_id: Option<String>,
    pub restaurant_id: Option<String>,
    pub role: Option<RoleId>,
}

/// Answers page-access queries for the currently stored token
///
/// Every query re-reads the store and re-decodes the token, so a token
/// swap (login, refresh) takes effect on the next call with no
/// invalidation hooks.
#[derive(Clone)]
pub struct PermissionResolver {
    store: Arc<TokenStore>,
}

impl PermissionResolver {
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }

    /// Role carried by the current access token
    pub fn current_role(&self) -> Option<RoleId> {
        let token = self.store.access_token()?;
        jwt::role_of(&token)
    }

    /// Identity snapshot for dialogs and display - all absent without a token
    pub fn current_user_context(&self) -> UserContext {
        let Some(token) = self.store.access_token() else {
            return UserContext::default();
        };

        UserContext {
            user_id: jwt::user_id_of(&token),
            restaurant_id: jwt::restaurant_id_of(&token),
            role: jwt::role_of(&token),
        }
    }

    /// Whether the current role may view a page. No role ⇒ false.
    pub fn can_access(&self, page: &str) -> bool {
        match self.current_role() {
            Some(role) => pages_for(role).contains(&page),
            None => false,
        }
    }

    /// Pages visible to the current role, for navbar filtering
    pub fn accessible_pages(&self) -> &'static [&'static str] {
        self.current_role().map(pages_for).unwrap_or(&[])
    }

    /// Landing page for the current role, guest fallback without one
    pub fn default_page(&self) -> &'static str {
        self.current_role()
            .map(default_page_for)
            .unwrap_or(GUEST_FALLBACK_PAGE)
    }

    /// Whether the current role is exactly `role`
    pub fn has_role(&self, role: RoleId) -> bool {
        self.current_role() == Some(role)
    }

    /// Whether the current role is any of `roles`
    pub fn has_any_role(&self, roles: &[RoleId]) -> bool {
        match self.current_role() {
            Some(role) => roles.contains(&role),
            None => false,
        }
    }

    /// Restaurant staff: Admin, Manager, Employee or Chef
    pub fn is_staff(&self) -> bool {
        self.has_any_role(&[
            RoleId::Admin,
            RoleId::Manager,
            RoleId::Employee,
            RoleId::Chef,
        ])
    }

    /// May manage restaurant configuration: Develop, Admin or Manager
    pub fn can_manage(&self) -> bool {
        self.has_any_role(&[RoleId::Develop, RoleId::Admin, RoleId::Manager])
    }

    /// Application-level administrator
    pub fn is_system_admin(&self) -> bool {
        self.has_role(RoleId::Develop)
    }
}
