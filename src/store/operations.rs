use crate::document::{self, Document};
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::path::{IntoKeyPath, KeyPath};
use crate::storage::StorageBackend;
use crate::store::core::SettingsStore;
use crate::store::io::kind_name;
use crate::sync::MutexExt;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;

impl<S: StorageBackend, F: FileSystem> SettingsStore<S, F> {
    /// Check whether `path` addresses an existing location.
    ///
    /// Every segment must resolve; an indexed segment needs an existing
    /// index into a sequence. A stored `null` counts as present. The root
    /// path is never present.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or the file cannot be
    /// loaded. A missing path is `Ok(false)`.
    pub fn has(&self, path: impl IntoKeyPath) -> Result<bool> {
        let path = path.into_key_path()?;
        let doc = self.load_document(&self.target())?;
        Ok(document::contains(&doc, &path))
    }

    /// Load the whole document
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be checked, created or read.
    pub fn get_all(&self) -> Result<Document> {
        self.load_document(&self.target())
    }

    /// Get the value at `path`.
    ///
    /// Returns `None` if any segment is missing, reads past the end of a
    /// sequence, indexes into a non-sequence or keys into a non-mapping.
    /// The root path returns the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or the file cannot be loaded.
    pub fn get(&self, path: impl IntoKeyPath) -> Result<Option<Value>> {
        let path = path.into_key_path()?;
        let doc = self.load_document(&self.target())?;

        if path.is_root() {
            return Ok(Some(Value::Object(doc)));
        }
        Ok(document::lookup(&doc, &path).cloned())
    }

    /// Get the value at `path`, or `default` when nothing is there.
    ///
    /// A stored `null` is returned as-is, not replaced by `default`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_or(&self, path: impl IntoKeyPath, default: impl Into<Value>) -> Result<Value> {
        Ok(self.get(path)?.unwrap_or_else(|| default.into()))
    }

    /// Get the value at `path` deserialized into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the stored value does not fit `T`,
    /// plus everything [`get`](Self::get) can return.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use prefstore::SettingsStore;
    /// # let store = SettingsStore::builder("my-app").build()?;
    /// let width: Option<u32> = store.get_as("window.width")?;
    /// # Ok::<(), prefstore::Error>(())
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, path: impl IntoKeyPath) -> Result<Option<T>> {
        let path = path.into_key_path()?;
        self.get(&path)?
            .map(|value| {
                serde_json::from_value(value).map_err(|e| Error::InvalidValue {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Set the value at `path` and save the document.
    ///
    /// Missing intermediate keys become mappings; an indexed segment past the
    /// end of its sequence grows the sequence, filling the gap with nulls.
    /// Intermediate values of the wrong shape are replaced. Setting the root
    /// path replaces the whole document and needs a mapping value.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed, a non-mapping value is
    /// assigned to the root, or the document cannot be loaded or saved.
    pub fn set(&self, path: impl IntoKeyPath, value: impl Into<Value>) -> Result<()> {
        let path = path.into_key_path()?;
        let value = value.into();

        if path.is_root() {
            return match value {
                Value::Object(doc) => self.set_all(doc),
                other => Err(Error::InvalidValue {
                    path: String::new(),
                    reason: format!(
                        "the document root must be a mapping, got a {}",
                        kind_name(&other)
                    ),
                }),
            };
        }

        self.mutate(|doc| document::assign(doc, &path, value))?;
        debug!("Set {path}");
        Ok(())
    }

    /// Replace the whole document and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be saved.
    pub fn set_all(&self, doc: Document) -> Result<()> {
        let _guard = self.write_lock.lock_recovered();
        self.save_document(&self.target(), &doc)?;
        debug!("Replaced settings document");
        Ok(())
    }

    /// Remove the value at `path` and save the document.
    ///
    /// A plain key is deleted from its mapping. An indexed segment has its
    /// slot replaced with null so later indices keep their positions. If the
    /// path does not resolve the document is saved unchanged. The root path
    /// clears the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or the document cannot be
    /// loaded or saved.
    pub fn unset(&self, path: impl IntoKeyPath) -> Result<()> {
        let path = path.into_key_path()?;
        if path.is_root() {
            return self.clear();
        }

        self.mutate(|doc| {
            if !document::remove(doc, &path) {
                debug!("Nothing stored at {path}, document unchanged");
            }
        })
    }

    /// Replace the document with an empty mapping and save it
    ///
    /// # Errors
    ///
    /// Returns an error if the empty document cannot be saved.
    pub fn clear(&self) -> Result<()> {
        self.set_all(Document::new())?;
        info!("All settings cleared");
        Ok(())
    }

    /// Load, apply `change`, save; serialized against other mutations
    fn mutate(&self, change: impl FnOnce(&mut Document)) -> Result<()> {
        let _guard = self.write_lock.lock_recovered();
        let target = self.target();
        let mut doc = self.load_document_locked(&target)?;
        change(&mut doc);
        self.save_document(&target, &doc)
    }
}
