//! Directory-backed key/value store with atomic, locked writes

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fs2::FileExt;
use tracing::debug;

use super::kv::KeyValueStore;

const EXTENSION: &str = ".json";

/// `path` with `suffix` appended to its file name (`a.json` -> `a.json.tmp`)
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data"));
    name.push(suffix);
    path.with_file_name(name)
}

/// Write `content` to `path` under an exclusive lock, via temp file + rename.
///
/// The parent directory is created if needed. The lock lives in a separate
/// `.lock` file so the rename never replaces a locked handle.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let lock_path = sibling(path, ".lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()))?;

    let temp_path = sibling(path, ".tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;

    // Lock released when lock_file drops
    Ok(())
}

/// One `<prefix><key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    prefix: String,
}

impl FileStore {
    /// Open (and create if missing) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names: ASCII letters, digits, `_`, `-` and `.`,
    /// not starting with a dot
    fn check_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            bail!("Invalid storage key: {key:?}");
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        Self::check_key(key)?;
        Ok(self.dir.join(format!("{}{}{}", self.prefix, key, EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn validate_key(&self, key: &str) -> Result<()> {
        Self::check_key(key)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "Stored key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to remove {}", path.display()));
            }
        }
        let _ = std::fs::remove_file(sibling(&path, ".lock"));
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list {}", self.dir.display()))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to list {}", self.dir.display()))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(full) = name.strip_suffix(EXTENSION) else { continue };
            if full.starts_with(&self.prefix) && full.len() > self.prefix.len() {
                keys.push(full.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), "lgh_").unwrap();

        assert_eq!(store.get("gamestate").unwrap(), None);
        store.set("gamestate", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("gamestate").unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert!(dir.path().join("lgh_gamestate.json").exists());

        store.set("gamestate", r#"{"a":2}"#).unwrap();
        assert_eq!(store.get("gamestate").unwrap().as_deref(), Some(r#"{"a":2}"#));
        assert!(!dir.path().join("lgh_gamestate.json.tmp").exists());

        store.remove("gamestate").unwrap();
        assert_eq!(store.get("gamestate").unwrap(), None);
        store.remove("gamestate").unwrap();
    }

    #[test]
    fn test_keys_ignore_foreign_and_lock_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), "lgh_").unwrap();
        store.set("gamestate", "{}").unwrap();
        store.set("theme", "\"dark\"").unwrap();
        std::fs::write(dir.path().join("other_thing.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["lgh_gamestate", "lgh_theme"]);

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
        assert!(dir.path().join("other_thing.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), "lgh_").unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.get("").is_err());
        assert!(store.validate_key("bad key").is_err());
        assert!(store.validate_key("gamestate").is_ok());
    }
}
