//! Generated document storage
//!
//! Documents are written under one directory with unique names and read
//! back by bare filename only.

use crate::types::*;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` as `<prefix>-<uuid>.pdf` and return the filename
    pub async fn save(&self, prefix: &str, bytes: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;
        let filename = format!("{}-{}.pdf", prefix, Uuid::new_v4());
        tokio::fs::write(self.root.join(&filename), bytes).await?;
        log::info!("Saved {} ({} bytes)", filename, bytes.len());
        Ok(filename)
    }

    /// Map a requested filename to its path inside the store.
    ///
    /// Names containing `..` or starting with a path separator are
    /// rejected, as is anything that is not a single path component.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let invalid = || FormError::InvalidFilename(filename.to_string());

        if filename.is_empty()
            || filename.contains("..")
            || filename.starts_with('/')
            || filename.starts_with('\\')
        {
            return Err(invalid());
        }

        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(invalid()),
        }
    }

    /// Read a stored document
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.resolve(filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FormError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
