//! Filesystem-backed collaborators for the core sessions.
//!
//! - [`FileStore`]: one `<key>.json` file per persisted key
//! - [`FileCorpusSource`]: translation documents read with `tokio::fs`

use scripture_core::corpus::CorpusSource;
use scripture_core::error::CorpusLoadError;
use scripture_core::storage::{KeyValueStore, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key-value store persisting each key as a file in one directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Io(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Io(format!("{}: {}", self.dir.display(), e)))?;

        // Readers never observe a partially written value
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }
}

/// Reads `<dir>/<translation>.json`.
#[derive(Debug, Clone)]
pub struct FileCorpusSource {
    dir: PathBuf,
}

impl FileCorpusSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait::async_trait(?Send)]
impl CorpusSource for FileCorpusSource {
    async fn fetch(&self, translation: &str) -> Result<Vec<u8>, CorpusLoadError> {
        let path = self.dir.join(format!("{}.json", translation));
        debug!("Reading translation from {}", path.display());
        tokio::fs::read(&path)
            .await
            .map_err(|e| CorpusLoadError::Fetch {
                translation: translation.to_string(),
                message: format!("{}: {}", path.display(), e),
            })
    }
}
