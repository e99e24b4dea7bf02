use crate::document::Document;
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::storage::StorageBackend;
use crate::store::core::SettingsStore;
use crate::sync::{MutexExt, RwLockExt};

use log::{debug, warn};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolved settings file and save options for one operation.
///
/// Taken once per operation so a concurrent `configure` cannot make the
/// load and the save of one mutation hit different files.
pub(crate) struct Target {
    pub(crate) file: PathBuf,
    atomic_save: bool,
    indent: usize,
}

/// `<file>.tmp` beside `file`
fn temp_path(file: &Path) -> Result<PathBuf> {
    let file_name = file.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Invalid settings path '{}': must have a file name",
            file.display()
        ))
    })?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    Ok(file.with_file_name(temp_name))
}

impl<S: StorageBackend, F: FileSystem> SettingsStore<S, F> {
    pub(crate) fn target(&self) -> Target {
        let config = self.config.read_recovered();
        Target {
            file: self.resolve_file_path(&config),
            atomic_save: config.atomic_save,
            indent: config.indent,
        }
    }

    /// Load the current document, creating an empty settings file if none exists.
    ///
    /// An empty or unparseable file yields an empty document (with a
    /// warning) instead of an error. The file is created under the write
    /// lock, so it never races a save made by a mutation on this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be checked or read, or if the
    /// missing file cannot be created.
    pub(crate) fn load_document(&self, target: &Target) -> Result<Document> {
        if !self.settings_file_exists(target)? {
            let _guard = self.write_lock.lock_recovered();
            self.ensure_settings_file(target)?;
        }
        self.read_document(target)
    }

    /// [`load_document`](Self::load_document) for callers already holding
    /// the write lock
    pub(crate) fn load_document_locked(&self, target: &Target) -> Result<Document> {
        self.ensure_settings_file(target)?;
        self.read_document(target)
    }

    fn settings_file_exists(&self, target: &Target) -> Result<bool> {
        match self.fs.stat(&target.file) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::FileRead {
                path: target.file.clone(),
                source: e,
            }),
        }
    }

    /// Write an empty document if the settings file is missing. Caller holds the write lock.
    fn ensure_settings_file(&self, target: &Target) -> Result<()> {
        if self.settings_file_exists(target)? {
            return Ok(());
        }
        debug!(
            "Settings file {} not found, creating it",
            target.file.display()
        );
        self.save_document(target, &Document::new())
    }

    fn read_document(&self, target: &Target) -> Result<Document> {
        let text = match self.fs.read_to_string(&target.file) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(
                    "Settings file {} is not valid UTF-8, using an empty document",
                    target.file.display()
                );
                return Ok(Document::new());
            }
            Err(e) => {
                return Err(Error::FileRead {
                    path: target.file.clone(),
                    source: e,
                });
            }
        };

        Ok(self.parse_document(&target.file, &text))
    }

    fn parse_document(&self, file: &Path, text: &str) -> Document {
        if text.trim().is_empty() {
            return Document::new();
        }

        match self.storage.deserialize::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Document::new(),
            Ok(other) => {
                warn!(
                    "Settings file {} does not hold a mapping (found {}), using an empty document",
                    file.display(),
                    kind_name(&other)
                );
                Document::new()
            }
            Err(e) => {
                warn!(
                    "Settings file {} is corrupt, using an empty document: {e}",
                    file.display()
                );
                Document::new()
            }
        }
    }

    /// Serialize `doc` and write it to the settings file.
    ///
    /// With atomic save the text goes to `<file>.tmp` first and is renamed
    /// over the settings file, so a failure never leaves it half written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, serialization
    /// fails, or the write or rename fails.
    pub(crate) fn save_document(&self, target: &Target, doc: &Document) -> Result<()> {
        if let Some(dir) = target.file.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(dir)
                .map_err(|e| Error::DirectoryCreate {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
        }

        let content = self.storage.serialize(doc, target.indent)?;

        if target.atomic_save {
            let temp = temp_path(&target.file)?;
            self.fs
                .write(&temp, &content)
                .map_err(|e| Error::FileWrite {
                    path: temp.clone(),
                    source: e,
                })?;
            self.fs
                .rename(&temp, &target.file)
                .map_err(|e| Error::FileWrite {
                    path: target.file.clone(),
                    source: e,
                })?;
        } else {
            self.fs
                .write(&target.file, &content)
                .map_err(|e| Error::FileWrite {
                    path: target.file.clone(),
                    source: e,
                })?;
        }

        debug!("Saved settings to {}", target.file.display());
        Ok(())
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
