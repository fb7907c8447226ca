//! Best-effort persistence of the language preference.

use crate::language::Language;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("session storage unavailable")]
    Unavailable,
    #[error("session storage access failed: {0}")]
    Access(String),
}

/// Key-value store for a single string preference.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub fn load_language(
    store: &impl PreferenceStore,
    key: &str,
) -> Result<Option<String>, StorageError> {
    store.get(key)
}

pub fn save_language(
    store: &impl PreferenceStore,
    key: &str,
    language: Language,
) -> Result<(), StorageError> {
    store.set(key, language.code())
}

#[cfg(target_arch = "wasm32")]
pub use browser::SessionStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{PreferenceStore, StorageError};
    use wasm_bindgen::JsValue;
    use web_sys::Storage;

    /// `window.sessionStorage`, looked up on every access since browsers may
    /// revoke it mid-session.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SessionStore;

    fn describe(err: JsValue) -> StorageError {
        StorageError::Access(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }

    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .session_storage()
            .map_err(describe)?
            .ok_or(StorageError::Unavailable)
    }

    impl PreferenceStore for SessionStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            storage()?.get_item(key).map_err(describe)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            storage()?.set_item(key, value).map_err(describe)
        }
    }
}
