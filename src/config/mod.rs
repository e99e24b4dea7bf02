//! Store configuration types
//!
//! This module contains:
//! - `StoreConfig` - where and how the settings file is persisted
//! - `ConfigOverrides` - partial configuration for `SettingsStore::configure`
//! - `DirectoryProvider` - source of the default settings directory

mod types;

pub(crate) use types::{expand_home, validate_file_name};
pub use types::{
    ConfigOverrides, DEFAULT_FILE_NAME, DEFAULT_INDENT, DirectoryProvider, FixedDir, PlatformDirs,
    StoreConfig,
};
