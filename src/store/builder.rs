//! Builder for SettingsStore
//!
//! This module contains [`StoreBuilder`] which provides a fluent API
//! for creating a [`SettingsStore`](super::SettingsStore).

use crate::config::{
    DirectoryProvider, PlatformDirs, StoreConfig, expand_home, validate_file_name,
};
use crate::error::Result;
use crate::fs::{FileSystem, StdFileSystem};
use crate::storage::{StorageBackend, YamlStorage};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use super::SettingsStore;

/// Builder for creating a [`SettingsStore`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use prefstore::{JsonStorage, SettingsStore};
///
/// let store = SettingsStore::builder("my-app")
///     .directory("~/.config/my-app")
///     .with_storage(JsonStorage::new())
///     .indent(4)
///     .build()
///     .unwrap();
///
/// // File name follows the format unless set explicitly
/// assert!(store.file_path().ends_with("settings.json"));
/// ```
pub struct StoreBuilder<S: StorageBackend = YamlStorage, F: FileSystem = StdFileSystem> {
    directory: Option<PathBuf>,
    file_name: Option<String>,
    atomic_save: bool,
    indent: usize,
    storage: S,
    fs: F,
    dir_provider: Arc<dyn DirectoryProvider>,
}

impl StoreBuilder {
    /// Create a new builder; `app_name` picks the platform data directory
    pub fn new(app_name: impl Into<String>) -> Self {
        let defaults = StoreConfig::default();
        Self {
            directory: None,
            file_name: None,
            atomic_save: defaults.atomic_save,
            indent: defaults.indent,
            storage: YamlStorage::new(),
            fs: StdFileSystem,
            dir_provider: Arc::new(PlatformDirs::new(app_name)),
        }
    }
}

impl<S: StorageBackend, F: FileSystem> StoreBuilder<S, F> {
    /// Set the settings directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directory = Some(expand_home(path.into()));
        self
    }

    /// Set the settings file name (default: `settings.<extension>`)
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Enable or disable temp-file-and-rename saves (default: enabled)
    pub fn atomic_save(mut self, enabled: bool) -> Self {
        self.atomic_save = enabled;
        self
    }

    /// Set the indent width for formats that support it (default: 2).
    ///
    /// Only JSON honours it. YAML is always written with two spaces and
    /// TOML with its own pretty layout.
    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = spaces;
        self
    }

    /// Use a custom source for the default settings directory
    pub fn dir_provider(mut self, provider: impl DirectoryProvider + 'static) -> Self {
        self.dir_provider = Arc::new(provider);
        self
    }

    /// Use a different serialization format
    pub fn with_storage<S2: StorageBackend>(self, storage: S2) -> StoreBuilder<S2, F> {
        StoreBuilder {
            directory: self.directory,
            file_name: self.file_name,
            atomic_save: self.atomic_save,
            indent: self.indent,
            storage,
            fs: self.fs,
            dir_provider: self.dir_provider,
        }
    }

    /// Use a different file system implementation
    pub fn with_file_system<F2: FileSystem>(self, fs: F2) -> StoreBuilder<S, F2> {
        StoreBuilder {
            directory: self.directory,
            file_name: self.file_name,
            atomic_save: self.atomic_save,
            indent: self.indent,
            storage: self.storage,
            fs,
            dir_provider: self.dir_provider,
        }
    }

    /// Build the [`SettingsStore`]. No I/O happens here; the settings file
    /// is created on first access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file name is empty or is not a plain
    /// file name.
    pub fn build(self) -> Result<SettingsStore<S, F>> {
        let default_name = format!("settings.{}", self.storage.extension());
        let file_name = self.file_name.unwrap_or_else(|| default_name.clone());

        validate_file_name(&file_name)?;

        let factory = StoreConfig {
            file_name: default_name,
            ..StoreConfig::default()
        };

        let config = StoreConfig {
            directory: self.directory,
            file_name,
            atomic_save: self.atomic_save,
            indent: self.indent,
        };

        info!(
            "Initialized settings store (file: {}, atomic save: {})",
            config.file_name,
            config.atomic_save
        );

        Ok(SettingsStore::from_parts(
            config,
            factory,
            self.storage,
            self.fs,
            self.dir_provider,
        ))
    }
}
