//! Persistence for editor state
//!
//! Editor state lives in four well-known slots of a string key-value store:
//! the markdown content, the custom theme list, the selected theme id and the
//! dark-mode flag. Values are stored as JSON. Reads never fail; a missing,
//! empty or corrupt value yields the default supplied by the caller.
//!
//! # Architecture
//!
//! - `mod.rs` - `StorageKey`, the `KeyValueStore` trait and the typed `Storage` wrapper
//! - `file.rs` - `FileStore`, a JSON file in the platform config directory
//! - `memory.rs` - `MemoryStore`, an in-process map

mod file;
mod memory;

pub use file::{get_config_dir, get_storage_file_path, FileStore};
pub use memory::MemoryStore;

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Storage Keys
// ─────────────────────────────────────────────────────────────────────────────

/// The persisted slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Markdown source of the current document
    Content,
    /// Custom themes
    Themes,
    /// Id of the selected theme
    CurrentThemeId,
    /// Whether the editor UI is in dark mode
    DarkMode,
}

impl StorageKey {
    /// The key under which the slot is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Content => "wechat_editor_content",
            StorageKey::Themes => "wechat_editor_themes",
            StorageKey::CurrentThemeId => "wechat_editor_current_theme_id",
            StorageKey::DarkMode => "wechat_editor_dark_mode",
        }
    }

    /// Get all slots.
    pub fn all() -> &'static [StorageKey] {
        &[
            StorageKey::Content,
            StorageKey::Themes,
            StorageKey::CurrentThemeId,
            StorageKey::DarkMode,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Key-Value Store
// ─────────────────────────────────────────────────────────────────────────────

/// A string-to-string store, shaped like browser `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed Storage
// ─────────────────────────────────────────────────────────────────────────────

/// JSON-typed access to the persisted slots of a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a slot, falling back to `default` if it is missing, empty, not
    /// valid JSON, or not of type `T`.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let raw = match self.store.get_item(key.as_str()) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                debug!("Failed to read {}: {}", key.as_str(), e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                debug!("Stored value for {} is unusable: {}", key.as_str(), e);
                default
            }
        }
    }

    /// Write a slot as JSON.
    ///
    /// Returns `true` if the value was stored. Failures are logged.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: StorageKey, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(Error::from)
            .and_then(|json| self.store.set_item(key.as_str(), &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save {}: {}", key.as_str(), e);
                false
            }
        }
    }

    /// Delete a slot.
    pub fn remove(&mut self, key: StorageKey) -> Result<()> {
        self.store.remove_item(key.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Application("unavailable".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Application("read-only".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(StorageKey::Content.as_str(), "wechat_editor_content");
        assert_eq!(StorageKey::Themes.as_str(), "wechat_editor_themes");
        assert_eq!(
            StorageKey::CurrentThemeId.as_str(),
            "wechat_editor_current_theme_id"
        );
        assert_eq!(StorageKey::DarkMode.as_str(), "wechat_editor_dark_mode");
        assert_eq!(StorageKey::all().len(), 4);
    }

    #[test]
    fn test_set_then_get() {
        let mut storage = Storage::new(MemoryStore::new());
        assert!(storage.set(StorageKey::Content, "# Hi"));
        assert!(storage.set(StorageKey::DarkMode, &true));

        assert_eq!(storage.get(StorageKey::Content, String::new()), "# Hi");
        assert!(storage.get(StorageKey::DarkMode, false));
        assert_eq!(
            storage.store().get_item("wechat_editor_content").unwrap().as_deref(),
            Some("\"# Hi\"")
        );
    }

    #[test]
    fn test_missing_value_returns_default() {
        let storage = Storage::new(MemoryStore::new());
        assert_eq!(storage.get(StorageKey::CurrentThemeId, "default".to_string()), "default");
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let mut store = MemoryStore::new();
        store.set_item("wechat_editor_themes", "{invalid json").unwrap();
        store.set_item("wechat_editor_dark_mode", "").unwrap();
        let storage = Storage::new(store);

        let themes: Vec<String> = storage.get(StorageKey::Themes, vec!["fallback".to_string()]);
        assert_eq!(themes, vec!["fallback".to_string()]);
        assert!(storage.get(StorageKey::DarkMode, true));
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        let mut store = MemoryStore::new();
        store.set_item("wechat_editor_dark_mode", "\"yes\"").unwrap();
        let storage = Storage::new(store);
        assert!(!storage.get(StorageKey::DarkMode, false));
    }

    #[test]
    fn test_remove() {
        let mut storage = Storage::new(MemoryStore::new());
        storage.set(StorageKey::Content, "x");
        storage.remove(StorageKey::Content).unwrap();
        assert_eq!(storage.get(StorageKey::Content, "gone".to_string()), "gone");
    }

    #[test]
    fn test_failing_store_degrades() {
        let mut storage = Storage::new(ReadOnlyStore);
        assert!(!storage.set(StorageKey::Content, "x"));
        assert_eq!(storage.get(StorageKey::Content, "d".to_string()), "d");
    }
}
