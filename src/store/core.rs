use crate::config::{ConfigOverrides, DirectoryProvider, StoreConfig};
use crate::error::Result;
use crate::fs::{FileSystem, StdFileSystem};
use crate::storage::{StorageBackend, YamlStorage};
use crate::sync::RwLockExt;

use log::{debug, warn};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

/// Path-addressed settings document persisted to a single file.
///
/// Every operation re-reads the file; nothing is cached between calls.
/// Mutations (`set`, `set_all`, `unset`, `clear`) on one store are
/// serialized internally, so overlapping writers through the same store do
/// not lose each other's changes. Two stores (or two processes) writing the
/// same file are not coordinated: the last save wins.
///
/// # Example
///
/// ```rust,no_run
/// use prefstore::SettingsStore;
///
/// let store = SettingsStore::builder("my-app")
///     .directory("~/.my-app")
///     .build()?;
///
/// store.set("window.position.maximized", true)?;
/// assert_eq!(store.get("window.position.maximized")?, Some(true.into()));
/// # Ok::<(), prefstore::Error>(())
/// ```
///
/// # Type Parameters
///
/// * `S`: serialization format (defaults to YAML)
/// * `F`: file system access (defaults to `std::fs`)
pub struct SettingsStore<S: StorageBackend = YamlStorage, F: FileSystem = StdFileSystem> {
    /// Current configuration
    pub(crate) config: RwLock<StoreConfig>,

    /// Configuration restored by [`reset`](Self::reset)
    pub(crate) factory: StoreConfig,

    /// Serialization format
    pub(crate) storage: S,

    /// File system access
    pub(crate) fs: F,

    /// Source of the directory used when none is configured
    pub(crate) dir_provider: Arc<dyn DirectoryProvider>,

    /// Held across load-modify-save so mutations don't interleave
    pub(crate) write_lock: Mutex<()>,
}

impl SettingsStore {
    /// Create a builder for `SettingsStore` with a fluent API.
    ///
    /// `app_name` selects the platform data directory used when no
    /// directory is configured.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use prefstore::SettingsStore;
    ///
    /// let store = SettingsStore::builder("my-app")
    ///     .file_name("prefs.yaml")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder(app_name: impl Into<String>) -> crate::store::StoreBuilder {
        crate::store::StoreBuilder::new(app_name)
    }

    /// Create a YAML store for `app_name` from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the file name is invalid.
    pub fn new(app_name: impl Into<String>, config: StoreConfig) -> Result<Self> {
        let StoreConfig {
            directory,
            file_name,
            atomic_save,
            indent,
        } = config;

        let mut builder = Self::builder(app_name)
            .file_name(file_name)
            .atomic_save(atomic_save)
            .indent(indent);
        if let Some(directory) = directory {
            builder = builder.directory(directory);
        }
        builder.build()
    }
}

impl<S: StorageBackend, F: FileSystem> SettingsStore<S, F> {
    /// Assemble a store from its parts.
    ///
    /// `factory` is the configuration [`reset`](Self::reset) goes back to.
    pub fn from_parts(
        config: StoreConfig,
        factory: StoreConfig,
        storage: S,
        fs: F,
        dir_provider: Arc<dyn DirectoryProvider>,
    ) -> Self {
        Self {
            config: RwLock::new(config),
            factory,
            storage,
            fs,
            dir_provider,
            write_lock: Mutex::new(()),
        }
    }

    /// Merge `overrides` into the current configuration. No I/O.
    ///
    /// Fields not set in `overrides` keep their current values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the file name is
    /// empty or is not a plain file name; the configuration is left as it was.
    pub fn configure(&self, overrides: ConfigOverrides) -> Result<()> {
        let mut config = self.config.write_recovered();
        config.apply(overrides)?;
        debug!("Settings store reconfigured: {:?}", *config);
        Ok(())
    }

    /// Restore the factory configuration. No I/O.
    pub fn reset(&self) {
        *self.config.write_recovered() = self.factory.clone();
        debug!("Settings store configuration reset");
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> StoreConfig {
        self.config.read_recovered().clone()
    }

    /// Get the storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Absolute path of the settings file the store currently reads and writes.
    ///
    /// Uses the configured directory, or the directory provider's user data
    /// directory when none is configured. Pure function of the configuration.
    pub fn file_path(&self) -> PathBuf {
        let config = self.config.read_recovered();
        self.resolve_file_path(&config)
    }

    pub(crate) fn resolve_file_path(&self, config: &StoreConfig) -> PathBuf {
        let dir = match &config.directory {
            Some(dir) => dir.clone(),
            None => self.dir_provider.user_data_dir().unwrap_or_else(|| {
                warn!("No user data directory available, using the current directory");
                PathBuf::from(".")
            }),
        };
        dir.join(&config.file_name)
    }
}
