//! Theme Manager for md2wechat
//!
//! Tracks the available themes (built-in plus user-imported), the selected
//! theme and the dark-mode flag, and moves that state in and out of
//! [`Storage`].
//!
//! # Usage
//!
//! ```ignore
//! use md2wechat::storage::{FileStore, Storage};
//! use md2wechat::theme::ThemeManager;
//!
//! let mut storage = Storage::new(FileStore::open_default()?);
//! let mut manager = ThemeManager::load(&storage);
//!
//! manager.select("tech-blue")?;
//! manager.toggle_dark_mode();
//! manager.save(&mut storage);
//! ```

use log::{debug, info, warn};
use serde_json::Value;

use super::builtin::{builtin_themes, is_builtin_id, DEFAULT_THEME_ID};
use super::{is_theme, is_theme_array, Theme};
use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, Storage, StorageKey};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Manages theme state.
///
/// Built-in themes always come first and can be neither replaced nor removed.
/// Custom themes keep their insertion order.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    builtin: Vec<Theme>,
    custom: Vec<Theme>,
    current_id: String,
    dark_mode: bool,
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeManager {
    /// Create a manager with only the built-in themes, `default` selected.
    pub fn new() -> Self {
        Self {
            builtin: builtin_themes(),
            custom: Vec::new(),
            current_id: DEFAULT_THEME_ID.to_string(),
            dark_mode: false,
        }
    }

    /// All themes, built-in first.
    pub fn all(&self) -> impl Iterator<Item = &Theme> {
        self.builtin.iter().chain(self.custom.iter())
    }

    /// User-imported themes.
    pub fn custom_themes(&self) -> &[Theme] {
        &self.custom
    }

    /// Look up a theme by id.
    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.all().find(|theme| theme.id == id)
    }

    /// Id of the selected theme.
    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    /// The selected theme.
    pub fn current(&self) -> &Theme {
        self.get(&self.current_id)
            .or_else(|| self.get(DEFAULT_THEME_ID))
            .unwrap_or(&self.builtin[0])
    }

    /// Select a theme by id.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::ThemeNotFound(id.to_string()));
        }
        if self.current_id != id {
            info!("Theme changed from {} to {}", self.current_id, id);
            self.current_id = id.to_string();
        }
        Ok(())
    }

    /// Add a custom theme, replacing an existing custom theme with the same id.
    ///
    /// The theme is always marked custom. Built-in ids are rejected.
    pub fn add_custom(&mut self, mut theme: Theme) -> Result<()> {
        if is_builtin_id(&theme.id) {
            return Err(Error::InvalidTheme(format!(
                "'{}' is the id of a built-in theme",
                theme.id
            )));
        }
        theme.is_custom = true;

        match self.custom.iter_mut().find(|existing| existing.id == theme.id) {
            Some(existing) => {
                debug!("Replacing custom theme {}", theme.id);
                *existing = theme;
            }
            None => {
                debug!("Adding custom theme {}", theme.id);
                self.custom.push(theme);
            }
        }
        Ok(())
    }

    /// Remove a custom theme.
    ///
    /// If it was selected, the selection falls back to the default theme.
    pub fn remove_custom(&mut self, id: &str) -> Result<Theme> {
        if is_builtin_id(id) {
            return Err(Error::InvalidTheme(format!(
                "built-in theme '{}' cannot be removed",
                id
            )));
        }
        let index = self
            .custom
            .iter()
            .position(|theme| theme.id == id)
            .ok_or_else(|| Error::ThemeNotFound(id.to_string()))?;

        let removed = self.custom.remove(index);
        if self.current_id == id {
            info!("Removed selected theme {}, falling back to {}", id, DEFAULT_THEME_ID);
            self.current_id = DEFAULT_THEME_ID.to_string();
        }
        Ok(removed)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Flip dark mode and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        debug!("Dark mode: {}", self.dark_mode);
        self.dark_mode
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Restore theme state from storage.
    ///
    /// A stored theme list that is not an array of themes is ignored as a
    /// whole. Individual entries that fail to deserialize or that use a
    /// built-in id are skipped. An unknown selected id falls back to the
    /// default theme.
    pub fn load<S: KeyValueStore>(storage: &Storage<S>) -> Self {
        let mut manager = Self::new();

        let stored = storage.get(StorageKey::Themes, Value::Array(Vec::new()));
        if is_theme_array(&stored) {
            if let Value::Array(entries) = stored {
                for entry in entries {
                    match serde_json::from_value::<Theme>(entry) {
                        Ok(theme) => {
                            if let Err(e) = manager.add_custom(theme) {
                                warn!("Skipping stored theme: {}", e);
                            }
                        }
                        Err(e) => warn!("Skipping stored theme: {}", e),
                    }
                }
            }
        } else {
            warn!("Stored custom themes are malformed, ignoring them");
        }

        let current_id = storage.get(StorageKey::CurrentThemeId, DEFAULT_THEME_ID.to_string());
        if manager.select(&current_id).is_err() {
            warn!("Stored theme '{}' is unavailable, using {}", current_id, DEFAULT_THEME_ID);
        }

        manager.dark_mode = storage.get(StorageKey::DarkMode, false);

        info!(
            "Loaded {} custom themes, current theme {}",
            manager.custom.len(),
            manager.current_id
        );
        manager
    }

    /// Persist theme state. Returns `true` if every slot was written.
    pub fn save<S: KeyValueStore>(&self, storage: &mut Storage<S>) -> bool {
        let themes = storage.set(StorageKey::Themes, &self.custom);
        let current = storage.set(StorageKey::CurrentThemeId, &self.current_id);
        let dark_mode = storage.set(StorageKey::DarkMode, &self.dark_mode);
        themes && current && dark_mode
    }
}

/// Parse a theme from JSON text, as supplied by a user import.
pub fn import_theme_json(json: &str) -> Result<Theme> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::InvalidTheme(e.to_string()))?;
    if !is_theme(&value) {
        return Err(Error::InvalidTheme(
            "expected an object with string `id`, string `name` and object `styles`".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| Error::InvalidTheme(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::theme::ThemeStyles;

    fn custom(id: &str) -> Theme {
        Theme {
            id: id.to_string(),
            name: format!("Theme {}", id),
            is_custom: false,
            styles: ThemeStyles::default(),
        }
    }

    #[test]
    fn test_new_manager() {
        let manager = ThemeManager::new();
        assert_eq!(manager.current_id(), DEFAULT_THEME_ID);
        assert_eq!(manager.current().id, DEFAULT_THEME_ID);
        assert_eq!(manager.all().count(), 3);
        assert!(manager.custom_themes().is_empty());
        assert!(!manager.is_dark_mode());
    }

    #[test]
    fn test_select() {
        let mut manager = ThemeManager::new();
        manager.select("tech-blue").unwrap();
        assert_eq!(manager.current().id, "tech-blue");

        let err = manager.select("missing").unwrap_err();
        assert!(matches!(err, Error::ThemeNotFound(_)));
        assert_eq!(manager.current_id(), "tech-blue");
    }

    #[test]
    fn test_add_custom_marks_and_replaces() {
        let mut manager = ThemeManager::new();
        manager.add_custom(custom("mine")).unwrap();
        assert!(manager.get("mine").unwrap().is_custom);

        let mut renamed = custom("mine");
        renamed.name = "Renamed".to_string();
        manager.add_custom(renamed).unwrap();
        assert_eq!(manager.custom_themes().len(), 1);
        assert_eq!(manager.get("mine").unwrap().name, "Renamed");
    }

    #[test]
    fn test_add_custom_rejects_builtin_id() {
        let mut manager = ThemeManager::new();
        let err = manager.add_custom(custom(DEFAULT_THEME_ID)).unwrap_err();
        assert!(matches!(err, Error::InvalidTheme(_)));
        assert!(!manager.get(DEFAULT_THEME_ID).unwrap().is_custom);
    }

    #[test]
    fn test_remove_selected_falls_back_to_default() {
        let mut manager = ThemeManager::new();
        manager.add_custom(custom("mine")).unwrap();
        manager.select("mine").unwrap();

        let removed = manager.remove_custom("mine").unwrap();
        assert_eq!(removed.id, "mine");
        assert_eq!(manager.current_id(), DEFAULT_THEME_ID);
        assert!(matches!(
            manager.remove_custom("mine"),
            Err(Error::ThemeNotFound(_))
        ));
        assert!(manager.remove_custom("tech-blue").is_err());
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut manager = ThemeManager::new();
        assert!(manager.toggle_dark_mode());
        assert!(!manager.toggle_dark_mode());
        manager.set_dark_mode(true);
        assert!(manager.is_dark_mode());
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = Storage::new(MemoryStore::new());
        let mut manager = ThemeManager::new();
        manager.add_custom(custom("mine")).unwrap();
        manager.select("mine").unwrap();
        manager.set_dark_mode(true);
        assert!(manager.save(&mut storage));

        let loaded = ThemeManager::load(&storage);
        assert_eq!(loaded.current_id(), "mine");
        assert!(loaded.current().is_custom);
        assert!(loaded.is_dark_mode());
        assert_eq!(loaded.custom_themes().len(), 1);
    }

    #[test]
    fn test_load_ignores_malformed_theme_list() {
        let mut store = MemoryStore::new();
        store
            .set_item("wechat_editor_themes", r#"[{"id": "x", "name": "X"}]"#)
            .unwrap();
        store
            .set_item("wechat_editor_current_theme_id", "\"x\"")
            .unwrap();
        let manager = ThemeManager::load(&Storage::new(store));

        assert!(manager.custom_themes().is_empty());
        assert_eq!(manager.current_id(), DEFAULT_THEME_ID);
    }

    #[test]
    fn test_load_skips_builtin_ids() {
        let mut store = MemoryStore::new();
        store
            .set_item(
                "wechat_editor_themes",
                r#"[{"id": "default", "name": "Fake", "styles": {}}, {"id": "ok", "name": "Ok", "styles": {}}]"#,
            )
            .unwrap();
        let manager = ThemeManager::load(&Storage::new(store));

        assert_eq!(manager.custom_themes().len(), 1);
        assert_eq!(manager.get(DEFAULT_THEME_ID).unwrap().name, "Default");
    }

    #[test]
    fn test_import_theme_json() {
        let theme =
            import_theme_json(r#"{"id": "t", "name": "T", "styles": {"h1": "color: red"}}"#).unwrap();
        assert_eq!(theme.id, "t");

        assert!(matches!(
            import_theme_json(r#"{"id": "t", "styles": {}}"#),
            Err(Error::InvalidTheme(_))
        ));
        assert!(matches!(import_theme_json("not json"), Err(Error::InvalidTheme(_))));
    }
}
