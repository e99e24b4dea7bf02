//! Atomic Save Integration Tests
//!
//! A save writes `<file>.tmp` and renames it over the settings file. These
//! tests interrupt that sequence and check what is left on disk.

mod common;

use common::{TestFixture, faulty_store};
use prefstore::{ConfigOverrides, Error};
use serde_json::json;
use std::sync::atomic::Ordering;
use tempfile::TempDir;

#[test]
fn test_failed_rename_keeps_previous_contents() {
    let temp_dir = TempDir::new().unwrap();
    let (store, fs) = faulty_store(temp_dir.path());

    store.set("version", 1).unwrap();
    let before = std::fs::read_to_string(store.file_path()).unwrap();

    fs.fail_rename.store(true, Ordering::SeqCst);
    let err = store.set("version", 2).unwrap_err();
    assert!(matches!(err, Error::FileWrite { .. }));

    // Canonical file untouched, new content stranded in the temp file
    assert_eq!(std::fs::read_to_string(store.file_path()).unwrap(), before);
    let temp = temp_dir.path().join("settings.yaml.tmp");
    assert_eq!(std::fs::read_to_string(&temp).unwrap(), "version: 2\n");

    fs.fail_rename.store(false, Ordering::SeqCst);
    assert_eq!(store.get("version").unwrap(), Some(json!(1)));
}

#[test]
fn test_failed_bootstrap_leaves_no_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let (store, fs) = faulty_store(temp_dir.path());
    fs.fail_rename.store(true, Ordering::SeqCst);

    assert!(store.get_all().unwrap_err().is_storage_fault());
    assert!(!store.file_path().exists());
}

#[test]
fn test_successful_save_leaves_no_temp_file() {
    let fixture = TestFixture::new();
    fixture.store.set("a.b", "c").unwrap();
    fixture.store.unset("a.b").unwrap();
    fixture.store.clear().unwrap();

    assert!(fixture.settings_path().exists());
    assert!(!fixture.temp_path().exists());
}

#[test]
fn test_save_goes_through_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let (store, fs) = faulty_store(temp_dir.path());

    store.set("a", 1).unwrap();

    let temp = temp_dir.path().join("settings.yaml.tmp");
    let target = temp_dir.path().join("settings.yaml");
    let calls = fs.calls();
    assert!(calls.contains(&format!("write {}", temp.display())));
    assert!(calls.contains(&format!("rename {}", temp.display())));
    assert!(!calls.contains(&format!("write {}", target.display())));
}

#[test]
fn test_non_atomic_save_skips_rename() {
    let temp_dir = TempDir::new().unwrap();
    let (store, fs) = faulty_store(temp_dir.path());
    store
        .configure(ConfigOverrides::new().atomic_save(false))
        .unwrap();
    fs.fail_rename.store(true, Ordering::SeqCst);

    store.set("a", 1).unwrap();

    assert_eq!(store.get("a").unwrap(), Some(json!(1)));
    assert!(!fs.calls().iter().any(|c| c.starts_with("rename")));
}
