//! Settings store
//!
//! This module contains [`SettingsStore`], the path-addressed settings
//! document backed by a single file, and its [`StoreBuilder`].

mod builder;
mod core;
mod io;
mod operations;

pub use builder::StoreBuilder;
pub use self::core::SettingsStore;
