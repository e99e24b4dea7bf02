//! # prefstore
//!
//! A small embedded settings store: one hierarchical document (mappings,
//! sequences and scalars) persisted to a single file, addressed with
//! dotted key paths.
//!
//! ## Features
//!
//! - **Path Addressing**: `get`/`set`/`has`/`unset` with paths like `"window.bounds[1].width"`
//! - **Auto-Vivification**: writing a deep path creates the mappings and sequences it needs
//! - **Atomic Saves**: temp file + rename so the settings file is never half written
//! - **Lazy Bootstrap**: the directory and file are created on first access
//! - **Forgiving Loads**: an empty or corrupt file reads as an empty document
//! - **Formats**: YAML (default), JSON, TOML (`toml` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prefstore::SettingsStore;
//! use serde_json::json;
//!
//! # fn example() -> prefstore::Result<()> {
//! let store = SettingsStore::builder("my-app")
//!     .directory("~/.my-app")
//!     .build()?;
//!
//! store.set("window.position", json!({"x": 10, "y": 20}))?;
//! store.set("recent[0]", "notes.md")?;
//!
//! assert!(store.has("window.position.x")?);
//! assert_eq!(store.get("window.position.y")?, Some(json!(20)));
//!
//! store.unset("window.position.x")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Paths
//!
//! A path is a dot-delimited string or a list of segments. Each segment is a
//! bare key (`window`) or a key with one index (`recent[2]`). Both forms are
//! equivalent:
//!
//! ```rust,no_run
//! # use prefstore::SettingsStore;
//! # fn example(store: &SettingsStore) -> prefstore::Result<()> {
//! assert_eq!(store.get("a.b[1].c")?, store.get(["a", "b[1]", "c"])?);
//! # Ok(())
//! # }
//! ```
//!
//! Removing an indexed value leaves a `null` hole so later indices don't move.
//!
//! ## Reconfiguring
//!
//! ```rust,no_run
//! use prefstore::{ConfigOverrides, SettingsStore};
//!
//! # fn example() -> prefstore::Result<()> {
//! let store = SettingsStore::builder("my-app").build()?;
//! store.configure(ConfigOverrides::new().file_name("window.yaml").atomic_save(false))?;
//! println!("settings live at {}", store.file_path().display());
//!
//! store.reset(); // back to settings.yaml in the platform data directory
//! # Ok(())
//! # }
//! ```

// Core modules
mod document;
mod error;
pub mod fs;
pub mod path;
pub mod storage;
mod store;
mod sync;

// Grouped modules
pub mod config;

// Re-exports from core
pub use config::{ConfigOverrides, DirectoryProvider, FixedDir, PlatformDirs, StoreConfig};
pub use document::Document;
pub use error::{Error, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use path::{IntoKeyPath, KeyPath, Segment};
pub use storage::{JsonStorage, StorageBackend, YamlStorage};
pub use store::{SettingsStore, StoreBuilder};

#[cfg(feature = "toml")]
pub use storage::TomlStorage;

/// Settings store writing JSON files.
///
/// # Example
/// ```no_run
/// use prefstore::{JsonSettingsStore, JsonStorage, SettingsStore};
///
/// let store: JsonSettingsStore = SettingsStore::builder("my-app")
///     .with_storage(JsonStorage::new())
///     .build()?;
/// # Ok::<(), prefstore::Error>(())
/// ```
pub type JsonSettingsStore = SettingsStore<JsonStorage>;
