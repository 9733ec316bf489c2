//! Document I/O for template filling

use crate::types::*;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Read a template file, bounded by `timeout`.
///
/// A missing file is reported as [`FormError::TemplateNotFound`] so the
/// caller can fall back to direct generation.
pub async fn load_template(path: impl AsRef<Path>, timeout: Duration) -> Result<Vec<u8>> {
    let path = path.as_ref().to_owned();
    match tokio::time::timeout(timeout, tokio::fs::read(&path)).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(FormError::TemplateNotFound(path))
        }
        Ok(Err(e)) => Err(FormError::Io(e)),
        Err(_) => Err(FormError::Io(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("timed out reading template {}", path.display()),
        ))),
    }
}
