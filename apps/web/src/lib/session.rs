//! Session token persistence. The token lives in browser `localStorage` under a
//! single well-known key and survives reloads within the same origin. There is
//! no expiry tracking here: a stored token counts as "signed in" until the API
//! rejects it. Only the login flow writes the token and only logout clears it.

use super::errors::AppError;

/// Storage key shared with any other tab of the same origin.
pub const TOKEN_KEY: &str = "token";

/// Key-value storage backing the session store.
pub trait TokenStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str);
}

/// Process-wide session token handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: TokenStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the stored token; blank values read as absent.
    pub fn token(&self) -> Option<String> {
        self.storage
            .read(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> Result<(), AppError> {
        self.storage.write(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) {
        self.storage.remove(TOKEN_KEY);
    }
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStorage for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = Self::storage()
            .ok_or_else(|| AppError::Config("Local storage is unavailable.".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| AppError::Config("Failed to persist the session token.".to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory storage; clones share the same map, like two handles on one origin.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStorage, SessionStore, TOKEN_KEY, TokenStorage};

    #[test]
    fn starts_absent() {
        let session = SessionStore::new(MemoryStorage::default());
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn set_then_get_returns_token() {
        let session = SessionStore::new(MemoryStorage::default());
        session.set_token("abc123").expect("set token");

        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn clear_removes_token() {
        let session = SessionStore::new(MemoryStorage::default());
        session.set_token("abc123").expect("set token");
        session.clear_token();

        assert_eq!(session.token(), None);
    }

    #[test]
    fn clones_share_storage() {
        let storage = MemoryStorage::default();
        let writer = SessionStore::new(storage.clone());
        let reader = SessionStore::new(storage.clone());

        writer.set_token("shared").expect("set token");

        assert_eq!(reader.token().as_deref(), Some("shared"));
        assert_eq!(storage.read(TOKEN_KEY).as_deref(), Some("shared"));
    }

    #[test]
    fn blank_token_reads_as_absent() {
        let storage = MemoryStorage::default();
        storage.write(TOKEN_KEY, "   ").expect("write");

        let session = SessionStore::new(storage);
        assert!(!session.is_authenticated());
    }
}
