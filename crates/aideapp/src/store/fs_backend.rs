use super::backend::StorageBackend;
use crate::error::{AideError, Result};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores one image as a single file, e.g. `<data dir>/contacts.json`.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string())
    }

    /// `<file>.corrupt-<stamp>`, with `-1`, `-2`, ... appended if that is taken.
    fn free_quarantine_path(&self) -> PathBuf {
        let base = format!(
            "{}.corrupt-{}",
            self.file_name(),
            Utc::now().format("%Y%m%d%H%M%S")
        );
        let mut target = self.dir().join(&base);
        let mut n = 1;
        while target.exists() {
            target = self.dir().join(format!("{}-{}", base, n));
            n += 1;
        }
        target
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(AideError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_image(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AideError::Io(e)),
        }
    }

    fn write_image(&self, image: &[u8]) -> Result<()> {
        let dir = self.dir();
        self.ensure_dir(dir)?;

        // Atomic write: tmp file in the same directory, then rename over the target
        let tmp_path = dir.join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4()));
        fs::write(&tmp_path, image).map_err(AideError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(AideError::Io(e));
        }
        Ok(())
    }

    fn quarantine_image(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = self.free_quarantine_path();
        fs::rename(&self.path, &target).map_err(AideError::Io)?;
        Ok(Some(target))
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
