/// Local filesystem persistence backend.
///
/// Stores each key as `<dir>/<key>.json` with atomic writes
/// (write to .tmp, fsync, rename, fsync directory).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{Persistence, StorageError};

pub struct LocalPersistence {
    dir: PathBuf,
}

impl LocalPersistence {
    /// Open a persistence directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Map a key to its backing file. Keys are restricted to simple names so
    /// they cannot escape the persistence directory.
    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Atomic write with fsync: write to .tmp, fsync, rename, fsync directory.
    fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;

        // fsync directory for rename durability
        if let Some(dir) = path.parent() {
            if let Ok(d) = fs::File::open(dir) {
                let _ = d.sync_all();
            }
        }
        Ok(())
    }
}

impl Persistence for LocalPersistence {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.key_path(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        let content = serde_json::to_string_pretty(value).map_err(|source| {
            StorageError::Malformed {
                key: key.to_string(),
                source,
            }
        })?;
        Self::atomic_write(&path, &content)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
