//! User Model

use serde::{Deserialize, Serialize};

/// Cached user record
///
/// Denormalized snapshot of the authenticated user, persisted client-side
/// for display purposes only. Authorization decisions always derive from
/// the live access token, never from this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
}

impl User {
    /// Name shown in the header bar: "First Last", falling back to the
    /// login name when both name parts are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.user_name.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: "u-1".into(),
            user_name: "mrossi".into(),
            email: "m.rossi@example.com".into(),
            first_name: "Mario".into(),
            last_name: "Rossi".into(),
            roles: vec!["Manager".into()],
            role_id: Some(3),
            restaurant_id: Some("r-9".into()),
        }
    }

    #[test]
    fn display_name_prefers_full_name() {
        assert_eq!(sample().display_name(), "Mario Rossi");

        let mut anon = sample();
        anon.first_name.clear();
        anon.last_name.clear();
        assert_eq!(anon.display_name(), "mrossi");
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"userName\":\"mrossi\""));
        assert!(json.contains("\"firstName\":\"Mario\""));
        assert!(json.contains("\"restaurantId\":\"r-9\""));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let parsed: User = serde_json::from_str(
            r#"{"id":"u-2","userName":"chef","email":"c@example.com","firstName":"Ana","lastName":"Silva"}"#,
        )
        .unwrap();
        assert!(parsed.roles.is_empty());
        assert_eq!(parsed.role_id, None);
        assert_eq!(parsed.restaurant_id, None);
    }
}
