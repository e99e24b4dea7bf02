//! Storage format trait and implementations
//!
//! A storage backend turns a document into text and back. It never touches
//! the file system; reading and writing files is the job of
//! [`FileSystem`](crate::fs::FileSystem).

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for serialization format implementations
///
/// This allows swapping YAML for JSON, TOML, or other formats.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "yaml", "json")
    fn extension(&self) -> &str;

    /// Serialize data to string.
    ///
    /// `indent` is the requested indent width in spaces. Formats whose
    /// serializer has a fixed layout ignore it.
    fn serialize<T: Serialize>(&self, data: &T, indent: usize) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;
}

// =============================================================================
// YAML Storage Implementation
// =============================================================================

/// YAML storage backend (default)
///
/// Output always uses two-space indentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlStorage;

impl YamlStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for YamlStorage {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn serialize<T: Serialize>(&self, data: &T, _indent: usize) -> Result<String> {
        serde_yaml::to_string(data).map_err(|e| Error::Serialize(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend
///
/// Pretty printed with the configured indent width; an indent of zero
/// produces compact single-line output.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonStorage;

impl JsonStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T, indent: usize) -> Result<String> {
        if indent == 0 {
            return serde_json::to_string(data).map_err(Error::from);
        }

        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        data.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| Error::Serialize(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// TOML Storage Implementation
// =============================================================================

/// TOML storage backend (requires the `toml` feature)
///
/// TOML has no null, so documents containing null values (including holes
/// left by indexed unsets) fail to serialize.
#[cfg(feature = "toml")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlStorage;

#[cfg(feature = "toml")]
impl TomlStorage {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "toml")]
impl StorageBackend for TomlStorage {
    fn extension(&self) -> &str {
        "toml"
    }

    fn serialize<T: Serialize>(&self, data: &T, _indent: usize) -> Result<String> {
        toml::to_string_pretty(data).map_err(|e| Error::Serialize(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
