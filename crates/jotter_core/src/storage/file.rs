//! File-backed storage slot.
//!
//! # Invariants
//! - Writes go through a sibling temp file followed by a rename, so readers
//!   see either the previous or the new content, never a torn write.

use crate::storage::{StorageError, StorageResult, StorageSlot};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage slot persisted as one file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Creates a slot at the given path. The file may not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("slot"),
            std::ffi::OsStr::to_os_string,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Unavailable {
                reason: format!("read `{}`: {err}", self.path.display()),
            }),
        }
    }

    fn write(&self, content: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::Unavailable {
                    reason: format!("create `{}`: {err}", parent.display()),
                })?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|err| StorageError::Unavailable {
            reason: format!("write `{}`: {err}", temp.display()),
        })?;
        fs::rename(&temp, &self.path).map_err(|err| StorageError::Unavailable {
            reason: format!("commit `{}`: {err}", self.path.display()),
        })?;
        Ok(())
    }
}
