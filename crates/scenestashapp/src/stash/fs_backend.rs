use super::backend::StashBackend;
use crate::error::{Result, SceneError};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Keeps each slot as `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the value for `key` lives on disk.
    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SceneError::Io)?;
        }
        Ok(())
    }
}

impl StashBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(SceneError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(SceneError::Io)?;
        fs::rename(&tmp_path, self.slot_path(key)).map_err(SceneError::Io)?;

        Ok(())
    }
}
