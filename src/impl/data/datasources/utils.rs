use std::{fs, io::Write as _, path::Path};

use fractic_server_error::ServerError;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::WriteError;

/// Replaces the file at `path` with `contents`. The bytes go to a temporary
/// file in the same directory, are synced to disk, and the temporary file is
/// then persisted over the destination, so readers never observe a
/// partially written file.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), ServerError> {
    let display = path.display().to_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| WriteError::with_debug(&display, &e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| WriteError::with_debug(&display, &e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.flush())
        .map_err(|e| WriteError::with_debug(&display, &e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| WriteError::with_debug(&display, &e))?;
    // On failure the temporary file is dropped and removed.
    tmp.persist(path)
        .map_err(|e| WriteError::with_debug(&display, &e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "file replaced");
    Ok(())
}

/// Reads a file that may not exist yet; a missing file reads as `None`.
pub(crate) fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
