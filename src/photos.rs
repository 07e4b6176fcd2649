//! On-disk photo storage.
//!
//! One flat directory of files named `{epoch-millis}{original-extension}`.
//! No subdirectories, no metadata sidecars — the registry in memory is the
//! only record of which file belongs to which item. Content is never
//! inspected: no type sniffing, no size limit, no check that the upload is
//! actually an image.
//!
//! Two uploads landing in the same millisecond collide and silently
//! overwrite each other. Known limitation, kept as-is.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::{Error, Result};

/// Persists uploaded photo bytes under the configured cache directory.
#[derive(Clone, Debug)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    /// A store rooted at `dir`. The directory must already exist; the binary
    /// creates it recursively at startup.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` to `{epoch-millis}{extension-of-original_name}` and
    /// returns the written path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let extension = Path::new(original_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let path = self.dir.join(format!("{millis}{extension}"));
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "stored photo");
        Ok(path)
    }

    /// Reads a stored photo back. A missing file is a [`Error::NotFound`];
    /// every other failure propagates as I/O.
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::NotFound(format!("photo file missing: {}", path.display())))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a stored photo. Deleting a file that is already gone is a
    /// successful no-op.
    pub async fn delete(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "deleted photo");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (PhotoStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (PhotoStore::new(dir.path().to_path_buf()), dir)
    }

    #[tokio::test]
    async fn save_names_files_by_time_and_original_extension() {
        let (store, _dir) = store();
        let path = store.save("hammer.png", b"bytes").await.unwrap();

        let file_name = path.file_name().unwrap().to_str().unwrap();
        let stem = file_name.strip_suffix(".png").unwrap();
        assert!(stem.parse::<u128>().is_ok(), "expected epoch millis, got {stem}");
        assert_eq!(path.parent().unwrap(), store.dir());
    }

    #[tokio::test]
    async fn save_tolerates_extensionless_names() {
        let (store, _dir) = store();
        let path = store.save("photo", b"bytes").await.unwrap();
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.parse::<u128>().is_ok());
    }

    #[tokio::test]
    async fn stored_bytes_read_back_identically() {
        let (store, _dir) = store();
        let payload = b"\xff\xd8\xff definitely a jpeg";
        let path = store.save("x.jpg", payload).await.unwrap();
        assert_eq!(store.read(&path).await.unwrap(), payload);
    }

    #[tokio::test]
    async fn reading_a_missing_file_is_not_found() {
        let (store, dir) = store();
        let gone = dir.path().join("123456.jpg");
        assert!(matches!(store.read(&gone).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (store, _dir) = store();
        let path = store.save("x.jpg", b"bytes").await.unwrap();
        store.delete(&path).await.unwrap();
        assert!(!path.exists());
        // Second delete of the same path succeeds too.
        store.delete(&path).await.unwrap();
    }
}
