//! File system access used by the settings store
//!
//! The store only needs a handful of primitives. Keeping them behind a trait
//! lets tests inject faults (for example a rename that fails after the temp
//! file was written).

use std::io;
use std::path::Path;
use std::sync::Arc;

/// File system primitives needed to load and persist a settings file
pub trait FileSystem: Send + Sync {
    /// Check that `path` exists and is accessible
    fn stat(&self, path: &Path) -> io::Result<()>;

    /// Read the whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` and write `contents`
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Rename `from` to `to`, replacing `to` if it exists
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create `path` and all missing parents. An existing directory is not an error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn stat(&self, path: &Path) -> io::Result<()> {
        std::fs::metadata(path).map(|_| ())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        match std::fs::create_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            other => other,
        }
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn stat(&self, path: &Path) -> io::Result<()> {
        (**self).stat(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stat_reports_not_found() {
        let dir = tempdir().unwrap();
        let err = StdFileSystem.stat(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_rename_read() {
        let dir = tempdir().unwrap();
        let fs = StdFileSystem;
        let tmp = dir.path().join("a.tmp");
        let target = dir.path().join("a");

        fs.write(&target, "old").unwrap();
        fs.write(&tmp, "new").unwrap();
        fs.rename(&tmp, &target).unwrap();

        assert_eq!(fs.read_to_string(&target).unwrap(), "new");
        assert!(fs.stat(&tmp).is_err());
    }

    #[test]
    fn test_create_dir_all_twice() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("x/y/z");
        StdFileSystem.create_dir_all(&nested).unwrap();
        StdFileSystem.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
