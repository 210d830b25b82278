//! Role Model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role identifier (RBAC)
///
/// Numeric values match the role ids the backend embeds in JWT role
/// claims. `Develop` is an application-level role; the rest are scoped to
/// a single restaurant, with `Guest` covering QR-code self-ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i64)]
pub enum RoleId {
    Develop = 1,
    Admin = 2,
    Manager = 3,
    Employee = 4,
    Chef = 5,
    Guest = 6,
}

/// Error returned when a numeric value maps to no known role
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown role id: {0}")]
pub struct InvalidRoleId(pub i64);

impl RoleId {
    /// All known roles, in id order
    pub const ALL: [RoleId; 6] = [
        RoleId::Develop,
        RoleId::Admin,
        RoleId::Manager,
        RoleId::Employee,
        RoleId::Chef,
        RoleId::Guest,
    ];

    /// Look up a role by its numeric id, `None` for unknown values
    pub fn from_id(id: i64) -> Option<Self> {
        Self::try_from(id).ok()
    }

    /// Numeric id as embedded in JWT role claims
    pub fn as_id(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for RoleId {
    type Error = InvalidRoleId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RoleId::Develop),
            2 => Ok(RoleId::Admin),
            3 => Ok(RoleId::Manager),
            4 => Ok(RoleId::Employee),
            5 => Ok(RoleId::Chef),
            6 => Ok(RoleId::Guest),
            other => Err(InvalidRoleId(other)),
        }
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoleId::Develop => "Developer",
            RoleId::Admin => "Admin",
            RoleId::Manager => "Manager",
            RoleId::Employee => "Employee",
            RoleId::Chef => "Chef",
            RoleId::Guest => "Guest",
        };
        f.write_str(name)
    }
}

impl Serialize for RoleId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_id())
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = i64::deserialize(deserializer)?;
        RoleId::try_from(id).map_err(serde::de::Error::custom)
    }
}
