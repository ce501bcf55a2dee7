//! File-backed key-value store
//!
//! All slots are kept in one JSON object in `storage.json` inside the
//! platform-specific configuration directory. Every write rewrites the file
//! atomically, so a crash never leaves a half-written store behind.

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{Error, Result, ResultExt};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "md2wechat";

/// Storage file name
const STORAGE_FILE_NAME: &str = "storage.json";

/// Temporary file name used during atomic writes
const STORAGE_BACKUP_NAME: &str = "storage.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\md2wechat\`
/// - **macOS**: `~/Library/Application Support/md2wechat/`
/// - **Linux**: `~/.config/md2wechat/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the storage file.
pub fn get_storage_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(STORAGE_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// File Store
// ─────────────────────────────────────────────────────────────────────────────

/// A [`KeyValueStore`] persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store in the default config directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(get_storage_file_path()?))
    }

    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = load_items(&path).unwrap_or_warn_default(
            BTreeMap::new(),
            &format!("Failed to load storage from {}", path.display()),
        );
        Self { path, items }
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                debug!("Creating storage directory: {}", dir.display());
                fs::create_dir_all(dir).map_err(|e| Error::StorageSave {
                    path: dir.to_path_buf(),
                    source: Box::new(e),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.items).map_err(|e| Error::StorageSave {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        // Write to backup file first (atomic write pattern)
        let backup_path = self.path.with_file_name(STORAGE_BACKUP_NAME);
        fs::write(&backup_path, &json).map_err(|e| Error::StorageSave {
            path: backup_path.clone(),
            source: Box::new(e),
        })?;

        // Replace original with backup
        fs::rename(&backup_path, &self.path).map_err(|e| Error::StorageSave {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        debug!("Storage saved to {}", self.path.display());
        Ok(())
    }
}

fn load_items(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        debug!("Storage file not found at {}, starting empty", path.display());
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::StorageLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    // Handle empty file
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let items = serde_json::from_str(&contents).map_err(|e| {
        warn!("Storage file at {} contains invalid JSON: {}", path.display(), e);
        Error::from(e)
    })?;

    info!("Storage loaded from {}", path.display());
    Ok(items)
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Storage, StorageKey};
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary storage directory.
    struct TestEnv {
        _temp_dir: TempDir,
        storage_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let storage_file = temp_dir.path().join(APP_NAME).join(STORAGE_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                storage_file,
            }
        }

        fn write_storage(&self, content: &str) {
            fs::create_dir_all(self.storage_file.parent().unwrap()).unwrap();
            fs::write(&self.storage_file, content).expect("Failed to write storage");
        }
    }

    #[test]
    fn test_get_config_dir_returns_path() {
        if let Ok(path) = get_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let env = TestEnv::new();
        let store = FileStore::open(&env.storage_file);
        assert!(store.get_item("anything").unwrap().is_none());
        assert!(!env.storage_file.exists());
    }

    #[test]
    fn test_set_creates_directory_and_persists() {
        let env = TestEnv::new();
        let mut store = FileStore::open(&env.storage_file);
        store.set_item("wechat_editor_content", "\"# Hi\"").unwrap();

        assert!(env.storage_file.exists());
        let reopened = FileStore::open(&env.storage_file);
        assert_eq!(
            reopened.get_item("wechat_editor_content").unwrap().as_deref(),
            Some("\"# Hi\"")
        );
        assert!(!env.storage_file.with_file_name(STORAGE_BACKUP_NAME).exists());
    }

    #[test]
    fn test_remove_persists() {
        let env = TestEnv::new();
        let mut store = FileStore::open(&env.storage_file);
        store.set_item("a", "1").unwrap();
        store.remove_item("a").unwrap();

        let reopened = FileStore::open(&env.storage_file);
        assert!(reopened.get_item("a").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_opens_empty_and_is_replaced() {
        let env = TestEnv::new();
        env.write_storage("{ invalid json }");

        let mut store = FileStore::open(&env.storage_file);
        assert!(store.get_item("a").unwrap().is_none());

        store.set_item("a", "1").unwrap();
        let contents = fs::read_to_string(&env.storage_file).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_empty_file_opens_empty() {
        let env = TestEnv::new();
        env.write_storage("   ");
        let store = FileStore::open(&env.storage_file);
        assert!(store.get_item("a").unwrap().is_none());
    }

    #[test]
    fn test_typed_storage_over_file() {
        let env = TestEnv::new();
        let mut storage = Storage::new(FileStore::open(&env.storage_file));
        storage.set(StorageKey::DarkMode, &true);

        let storage = Storage::new(FileStore::open(&env.storage_file));
        assert!(storage.get(StorageKey::DarkMode, false));
    }

    #[test]
    fn test_invalid_slot_value_returns_default() {
        let env = TestEnv::new();
        env.write_storage(r#"{"wechat_editor_current_theme_id": "{invalid json"}"#);

        let storage = Storage::new(FileStore::open(&env.storage_file));
        let id: String = storage.get(StorageKey::CurrentThemeId, "default".to_string());
        assert_eq!(id, "default");
    }
}
