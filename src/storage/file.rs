//! File-backed store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling
//! first and are renamed into place, so a crash never leaves half a blob.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{QuickQrError, QuickQrResult};
use crate::log_debug;

/// Directory of one-file-per-key blobs
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> QuickQrResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            QuickQrError::storage(format!("Cannot create storage directory {}", dir.display()))
                .with_details(e.to_string())
        })?;
        Ok(Self { dir })
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> QuickQrResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(QuickQrError::storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> QuickQrResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuickQrError::storage(format!("Cannot read {}", path.display()))
                .with_details(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> QuickQrResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path).map_err(|e| {
            QuickQrError::storage(format!("Cannot replace {}", path.display()))
                .with_details(e.to_string())
        })?;

        log_debug!("storage", "Blob written", key = key, bytes = value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> QuickQrResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("quickqr_history").unwrap(), None);

        store.set("quickqr_history", "[]").unwrap();
        assert_eq!(store.get("quickqr_history").unwrap(), Some("[]".to_string()));
        assert!(store.dir().join("quickqr_history.json").exists());

        store.remove("quickqr_history").unwrap();
        assert_eq!(store.get("quickqr_history").unwrap(), None);
        store.remove("quickqr_history").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
