//! Filesystem access for the backup.
//!
//! All disk access goes through the [`Filesystem`] trait so the orchestrator
//! can run against [`LocalFs`] in production and an in-memory double in tests.

#[cfg(test)]
pub(crate) mod memory;

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Minimal filesystem capability needed to write a backup tree
pub trait Filesystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and every missing ancestor.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate `path` and write `contents` to it.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Create or truncate `path` and return a writer for streaming content.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}

/// The real, local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

/// Make a directory if it does not exist already, parents included
pub fn ensure_dir(fs: &dyn Filesystem, path: &Path) -> Result<()> {
    if !fs.exists(path) {
        fs.create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write `content` to `path`, replacing whatever was there
pub fn save_file(fs: &dyn Filesystem, path: &Path, content: &[u8]) -> Result<()> {
    fs.write(path, content)
        .with_context(|| format!("failed to save file content: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryFs;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_new_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");

        ensure_dir(&LocalFs, &dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_creates_all_parents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir").join("sub-dir").join("sub-sub-dir");

        ensure_dir(&LocalFs, &dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_existing_is_noop() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("keep.txt"), b"keep").unwrap();

        ensure_dir(&LocalFs, &dir).unwrap();
        ensure_dir(&LocalFs, &dir).unwrap();
        assert_eq!(std::fs::read(dir.join("keep.txt")).unwrap(), b"keep");
    }

    #[test]
    fn test_ensure_dir_failure_is_reported() {
        let fs = MemoryFs::new().failing_mkdir();
        let err = ensure_dir(&fs, Path::new("/fake-dir")).unwrap_err();

        assert!(err.to_string().contains("failed to create directory"));
        assert!(err.to_string().contains("fake-dir"));
        assert!(!fs.is_dir(Path::new("/fake-dir")));
    }

    #[test]
    fn test_ensure_dir_skips_create_when_present() {
        let fs = MemoryFs::new();
        fs.create_dir_all(Path::new("/out")).unwrap();
        let fs = fs.failing_mkdir();

        // Existing directory must not hit the failing create path
        ensure_dir(&fs, Path::new("/out")).unwrap();
    }

    #[test]
    fn test_save_file_writes_exact_bytes() {
        let temp = TempDir::new().unwrap();
        let filename = temp.path().join("filename");

        save_file(&LocalFs, &filename, b"").unwrap();
        assert_eq!(std::fs::read(&filename).unwrap(), b"");

        let content = [0u8, 159, 146, 150, b'\n', b'x'];
        save_file(&LocalFs, &filename, &content).unwrap();
        assert_eq!(std::fs::read(&filename).unwrap(), content);
    }

    #[test]
    fn test_save_file_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let filename = temp
            .path()
            .join("dir")
            .join("sub-dir")
            .join("filename");

        let err = save_file(&LocalFs, &filename, b"content").unwrap_err();
        assert!(err.to_string().contains("failed to save file content"));
        assert!(!filename.exists());
    }

    #[test]
    fn test_local_create_streams_content() {
        let temp = TempDir::new().unwrap();
        let filename = temp.path().join("streamed.bin");

        let mut out = LocalFs.create(&filename).unwrap();
        out.write_all(b"hello ").unwrap();
        out.write_all(b"world").unwrap();
        out.flush().unwrap();
        drop(out);

        assert_eq!(std::fs::read(&filename).unwrap(), b"hello world");
    }
}
