//! # Session Storage
//!
//! Persists the auth token and logged-in user as a JSON file between runs.

use serde::Deserialize;
use shop_core::{Session, ShopError, ShopResult, User};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// On-disk shape; either half may be missing from an older or hand-edited file
#[derive(Debug, Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored session; `None` when nobody is logged in
    pub fn load(&self) -> ShopResult<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ShopError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let stored: StoredSession = serde_json::from_str(&content)?;
        match (stored.token, stored.user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok(Some(Session::new(token, user))),
            _ => Ok(None),
        }
    }

    pub fn save(&self, session: &Session) -> ShopResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShopError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content).map_err(|e| {
            ShopError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Forget the stored session. Clearing an absent session is not an error.
    pub fn clear(&self) -> ShopResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ShopError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{Name, User};

    fn session() -> Session {
        Session::new(
            "tok",
            User {
                id: 2,
                email: "morrison@gmail.com".into(),
                username: "mor_2314".into(),
                password: None,
                name: Name {
                    firstname: "david".into(),
                    lastname: "morrison".into(),
                },
                address: None,
                phone: "1-570-236-7033".into(),
            },
        )
    }

    #[test]
    fn test_missing_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directories_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/state/session.json"));

        store.save(&session()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.user.username, "mor_2314");
        assert_eq!(loaded.auth_header(), "Bearer tok");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(path);
        assert!(matches!(store.load(), Err(ShopError::Serialization(_))));
    }

    #[test]
    fn test_partial_session_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::new(&path);

        std::fs::write(&path, r#"{"token":"tok"}"#).unwrap();
        assert!(store.load().unwrap().is_none());

        let user = serde_json::to_value(session().user).unwrap();
        std::fs::write(&path, serde_json::json!({ "user": user }).to_string()).unwrap();
        assert!(store.load().unwrap().is_none());

        std::fs::write(&path, serde_json::json!({ "token": "", "user": user }).to_string())
            .unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
