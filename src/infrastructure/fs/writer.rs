//! Atomic file writer
//!
//! Uses the tempfile + rename pattern so readers never observe a partially
//! written file.

use std::io::Write;
use std::path::Path;

/// Write content to a file atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Async wrapper that runs [`atomic_write`] on the blocking pool.
pub async fn atomic_write_async(path: &Path, content: Vec<u8>) -> std::io::Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || atomic_write(&path, &content))
        .await
        .map_err(std::io::Error::other)?
}
