use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::content::application::ports::outgoing::key_value_store::{KeyValueStore, StorageError};

/// One file per key under a directory.
///
/// Each write lands in its own temporary sibling that is then renamed into
/// place, so overlapping writers never share a file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

fn io_error(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await.map_err(io_error)?;

        let target = self.path_for(key);
        let tmp = target.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));
        let written = match fs::write(&tmp, value).await {
            Ok(()) => fs::rename(&tmp, &target).await,
            Err(e) => Err(e),
        };

        if written.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        written.map_err(io_error)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}
