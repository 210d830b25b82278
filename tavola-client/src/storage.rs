//! TokenStore - durable session storage
//!
//! Persists the access/refresh token pair, the cached user record and the
//! theme preference as flat string slots in a single JSON file. Corrupted
//! slots are sanitized on read instead of surfacing errors; a broken
//! store file degrades to an empty store after an unconditional clear.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use shared::models::User;

/// Storage slot keys. Internal contract, stable for the session lifetime.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER: &str = "user_data";
    pub const THEME: &str = "theme_preference";
}

/// Session store file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    slots: HashMap<String, String>,
}

/// Durable client-side session store
///
/// All mutation goes through [`crate::auth::AuthFlow`]; resolver and
/// guard only read. Methods never error to the caller - persistence
/// failures are logged and the in-memory view stays authoritative.
pub struct TokenStore {
    /// Store file path: {storage_dir}/session.json
    file_path: PathBuf,
    slots: RwLock<HashMap<String, String>>,
}

/// The literal strings "undefined"/"null" leak out of buggy serializers
/// upstream and must never be treated as real values.
fn is_sentinel(value: &str) -> bool {
    value.is_empty() || value == "undefined" || value == "null"
}

impl TokenStore {
    /// Load the store from disk, or start empty
    ///
    /// An unreadable or malformed store file is removed outright so the
    /// app never boots against inconsistent session state.
    pub fn load(storage_dir: &Path) -> Self {
        let file_path = storage_dir.join("session.json");

        let slots = match std::fs::read_to_string(&file_path) {
            Ok(content) => match serde_json::from_str::<StoreFile>(&content) {
                Ok(file) => file.slots,
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed session store, clearing");
                    let _ = std::fs::remove_file(&file_path);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            file_path,
            slots: RwLock::new(slots),
        }
    }

    fn persist(&self, slots: &HashMap<String, String>) {
        let file = StoreFile {
            slots: slots.clone(),
        };
        let result = serde_json::to_string_pretty(&file).map(|content| {
            if let Some(parent) = self.file_path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            std::fs::write(&self.file_path, content)
        });

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to persist session store"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session store"),
        }
    }

    /// Store the token pair from a successful login
    ///
    /// Rejects empty or sentinel-valued tokens as a unit: a half-written
    /// pair is worse than none.
    pub fn save_tokens(&self, access: &str, refresh: &str) {
        if is_sentinel(access) || is_sentinel(refresh) {
            tracing::error!("Refusing to store invalid token pair");
            return;
        }

        let mut slots = self.write_slots();
        slots.insert(keys::ACCESS_TOKEN.to_string(), access.to_string());
        slots.insert(keys::REFRESH_TOKEN.to_string(), refresh.to_string());
        self.persist(&slots);
        tracing::debug!("Tokens saved");
    }

    /// Read the (access, refresh) pair, normalizing sentinel values to absent
    pub fn tokens(&self) -> (Option<String>, Option<String>) {
        let slots = self.read_slots();
        (
            Self::valid_slot(&slots, keys::ACCESS_TOKEN),
            Self::valid_slot(&slots, keys::REFRESH_TOKEN),
        )
    }

    /// Current access token, if a valid one is stored
    pub fn access_token(&self) -> Option<String> {
        Self::valid_slot(&self.read_slots(), keys::ACCESS_TOKEN)
    }

    /// `Authorization` header value for authorized API calls
    pub fn auth_header(&self) -> Option<String> {
        self.access_token().map(|t| format!("Bearer {}", t))
    }

    /// Cache the user record for display
    pub fn save_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => {
                let mut slots = self.write_slots();
                slots.insert(keys::USER.to_string(), json);
                self.persist(&slots);
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize user record"),
        }
    }

    /// Read the cached user record
    ///
    /// A slot that fails to parse is cleared on the spot; the caller just
    /// sees an absent user.
    pub fn user(&self) -> Option<User> {
        let raw = {
            let slots = self.read_slots();
            slots.get(keys::USER).cloned()
        }?;

        if is_sentinel(&raw) {
            return None;
        }

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable cached user, clearing slot");
                let mut slots = self.write_slots();
                slots.remove(keys::USER);
                self.persist(&slots);
                None
            }
        }
    }

    /// Remove the session slots (tokens + user). Theme preference survives.
    pub fn clear_all(&self) {
        let mut slots = self.write_slots();
        slots.remove(keys::ACCESS_TOKEN);
        slots.remove(keys::REFRESH_TOKEN);
        slots.remove(keys::USER);
        self.persist(&slots);
        tracing::debug!("Session storage cleared");
    }

    /// Purge everything when the user slot holds a sentinel string
    ///
    /// Returns whether the sweep fired, so the caller can cascade into a
    /// full logout.
    pub fn clear_if_corrupted(&self) -> bool {
        let corrupted = {
            let slots = self.read_slots();
            slots
                .get(keys::USER)
                .is_some_and(|raw| raw == "undefined" || raw == "null")
        };

        if corrupted {
            tracing::warn!("Corrupted user slot found in session store, clearing");
            self.clear_all();
        }
        corrupted
    }

    /// Stored theme preference
    pub fn theme(&self) -> Option<String> {
        Self::valid_slot(&self.read_slots(), keys::THEME)
    }

    /// Persist the theme preference
    pub fn save_theme(&self, theme: &str) {
        let mut slots = self.write_slots();
        slots.insert(keys::THEME.to_string(), theme.to_string());
        self.persist(&slots);
    }

    fn valid_slot(slots: &HashMap<String, String>, key: &str) -> Option<String> {
        slots
            .get(key)
            .filter(|v| !is_sentinel(v))
            .cloned()
    }

    /// Plant a raw value in the user slot, bypassing serialization
    #[cfg(test)]
    pub(crate) fn save_raw_user_slot(&self, raw: &str) {
        let mut slots = self.write_slots();
        slots.insert(keys::USER.to_string(), raw.to_string());
        self.persist(&slots);
    }

    fn read_slots(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slots(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}
