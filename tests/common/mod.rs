//! Common test utilities for prefstore integration tests
//!
//! Provides a temp-dir backed store fixture and a file system wrapper that
//! can inject faults.

#![allow(dead_code)]

use prefstore::{FileSystem, SettingsStore, StdFileSystem, YamlStorage};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

// =============================================================================
// Test Fixture
// =============================================================================

/// A store writing to a fresh temporary directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub store: SettingsStore,
}

impl TestFixture {
    /// Fresh store with the default file name
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::builder("test-app")
            .directory(temp_dir.path())
            .build()
            .unwrap();
        Self { temp_dir, store }
    }

    /// Fresh store using `file_name`
    pub fn with_file_name(file_name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::builder("test-app")
            .directory(temp_dir.path())
            .file_name(file_name)
            .build()
            .unwrap();
        Self { temp_dir, store }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.store.file_path()
    }

    pub fn temp_path(&self) -> PathBuf {
        let mut name = self.settings_path().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Raw text of the settings file
    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(self.settings_path()).unwrap()
    }

    /// Overwrite the settings file with arbitrary bytes
    pub fn write_raw(&self, contents: impl AsRef<[u8]>) {
        std::fs::write(self.settings_path(), contents).unwrap();
    }
}

// =============================================================================
// Fault Injection
// =============================================================================

/// `std::fs` with switchable failures and a log of attempted operations
#[derive(Default)]
pub struct FaultyFs {
    pub fail_rename: AtomicBool,
    pub fail_stat: AtomicBool,
    pub fail_create_dir: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl FaultyFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, path: &Path) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{op} {}", path.display()));
    }
}

impl FileSystem for FaultyFs {
    fn stat(&self, path: &Path) -> io::Result<()> {
        self.record("stat", path);
        if self.fail_stat.load(Ordering::SeqCst) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        StdFileSystem.stat(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record("read", path);
        StdFileSystem.read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.record("write", path);
        StdFileSystem.write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.record("rename", from);
        if self.fail_rename.load(Ordering::SeqCst) {
            return Err(io::Error::other("simulated crash before rename"));
        }
        StdFileSystem.rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record("mkdir", path);
        if self.fail_create_dir.load(Ordering::SeqCst) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        StdFileSystem.create_dir_all(path)
    }
}

/// Store in `dir` sharing a [`FaultyFs`] so tests can flip faults after building
pub fn faulty_store(dir: &Path) -> (SettingsStore<YamlStorage, Arc<FaultyFs>>, Arc<FaultyFs>) {
    let fs = Arc::new(FaultyFs::new());
    let store = SettingsStore::builder("test-app")
        .directory(dir)
        .with_file_system(Arc::clone(&fs))
        .build()
        .unwrap();
    (store, fs)
}
