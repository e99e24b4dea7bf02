//! Core configuration types for the settings store

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default settings file name
pub const DEFAULT_FILE_NAME: &str = "settings.yaml";

/// Default indent width (spaces) for formats that support it
pub const DEFAULT_INDENT: usize = 2;

/// Where and how a [`SettingsStore`](crate::SettingsStore) persists its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the settings file.
    /// `None` means "ask the [`DirectoryProvider`]".
    pub directory: Option<PathBuf>,

    /// Settings file name inside `directory` (default: "settings.yaml")
    pub file_name: String,

    /// Write through a `<file_name>.tmp` sibling and rename it into place
    pub atomic_save: bool,

    /// Indent width in spaces for formats that support it (JSON only)
    pub indent: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: DEFAULT_FILE_NAME.into(),
            atomic_save: true,
            indent: DEFAULT_INDENT,
        }
    }
}

impl StoreConfig {
    /// Merge the fields set in `overrides` into this configuration.
    ///
    /// Fields left as `None` keep their current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the overriding file name is not a plain
    /// file name. Nothing is changed in that case.
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(file_name) = &overrides.file_name {
            validate_file_name(file_name)?;
        }

        if let Some(directory) = overrides.directory {
            self.directory = Some(directory);
        }
        if let Some(file_name) = overrides.file_name {
            self.file_name = file_name;
        }
        if let Some(atomic_save) = overrides.atomic_save {
            self.atomic_save = atomic_save;
        }
        if let Some(indent) = overrides.indent {
            self.indent = indent;
        }
        Ok(())
    }
}

/// Check that `name` is a single non-empty path component
pub(crate) fn validate_file_name(name: &str) -> Result<()> {
    if Path::new(name).file_name().is_none_or(|n| n != name) {
        return Err(Error::Config(format!(
            "Invalid settings file name '{name}'"
        )));
    }
    Ok(())
}

/// Partial configuration applied with [`SettingsStore::configure`](crate::SettingsStore::configure)
///
/// # Example
/// ```rust
/// use prefstore::ConfigOverrides;
///
/// let overrides = ConfigOverrides::new()
///     .directory("/tmp/my-app")
///     .file_name("prefs.yaml");
/// assert_eq!(overrides.atomic_save, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub directory: Option<PathBuf>,
    pub file_name: Option<String>,
    pub atomic_save: Option<bool>,
    pub indent: Option<usize>,
}

impl ConfigOverrides {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the settings directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directory = Some(expand_home(path.into()));
        self
    }

    /// Override the settings file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Enable or disable temp-file-and-rename saves
    pub fn atomic_save(mut self, enabled: bool) -> Self {
        self.atomic_save = Some(enabled);
        self
    }

    /// Override the indent width. Ignored by the YAML and TOML formats.
    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = Some(spaces);
        self
    }
}

/// Source of the default settings directory
///
/// Consulted on every path resolution when no directory is configured.
/// Implementations must not have side effects.
pub trait DirectoryProvider: Send + Sync {
    /// The current user's application data directory, if known
    fn user_data_dir(&self) -> Option<PathBuf>;
}

/// Platform application data directory for a named app
/// (e.g. `~/.config/<app>` on Linux)
#[derive(Debug, Clone)]
pub struct PlatformDirs {
    app_name: String,
}

impl PlatformDirs {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl DirectoryProvider for PlatformDirs {
    fn user_data_dir(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(&self.app_name))
    }
}

/// Fixed directory, mostly useful for tests and embedding
#[derive(Debug, Clone)]
pub struct FixedDir(pub PathBuf);

impl DirectoryProvider for FixedDir {
    fn user_data_dir(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Expand a leading `~` to the home directory
pub(crate) fn expand_home(path: PathBuf) -> PathBuf {
    if !path.starts_with("~") {
        return path;
    }
    match dirs::home_dir() {
        Some(home) => home.join(path.strip_prefix("~").unwrap_or(&path)),
        None => path,
    }
}
