//! Backing stores for the profile document

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gcfeeder_errors::ProfileError;
use gcfeeder_schema::DocumentValue;
use parking_lot::Mutex;
use tracing::debug;

/// Where the store document lives.
pub trait DocumentStorage {
    /// Read the whole store document.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Io`] if the document cannot be read,
    /// [`ProfileError::InvalidFormat`] if it is not JSON.
    fn load_document(&self) -> Result<DocumentValue, ProfileError>;

    /// Replace the whole store document.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Io`] if the document cannot be written. The previous
    /// document is left in place.
    fn save_document(&mut self, document: &DocumentValue) -> Result<(), ProfileError>;

    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;
}

/// Low-level storage failure with its source.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<StorageError> for ProfileError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::Io { path, .. } => ProfileError::io(path.display().to_string(), err.to_string()),
            StorageError::Json { path, source } => {
                ProfileError::invalid_format(path.display().to_string(), source.to_string())
            }
        }
    }
}

/// Store document kept in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    atomic_writes: bool,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: true,
        }
    }

    /// Set atomic writes option
    #[must_use]
    pub fn with_atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<DocumentValue, StorageError> {
        debug!(path = ?self.path, "Reading store document");
        let text = fs::read_to_string(&self.path).map_err(|e| StorageError::io("read", &self.path, e))?;
        let value: serde_json::Value = serde_json::from_str(&text).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(DocumentValue::from(value))
    }

    /// Write `content`, through a temporary sibling file when atomic writes
    /// are enabled so the original survives a failed write.
    fn write(&self, content: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io("create directory", parent, e))?;
        }

        if !self.atomic_writes {
            return fs::write(&self.path, content).map_err(|e| StorageError::io("write", &self.path, e));
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|e| StorageError::io("write", &temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| StorageError::io("rename into", &self.path, e))?;
        debug!(path = ?self.path, "Store document written atomically");
        Ok(())
    }
}

impl DocumentStorage for FileStorage {
    fn load_document(&self) -> Result<DocumentValue, ProfileError> {
        Ok(self.read()?)
    }

    fn save_document(&mut self, document: &DocumentValue) -> Result<(), ProfileError> {
        let json = serde_json::Value::from(document);
        let mut content = serde_json::to_string_pretty(&json).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        content.push('\n');
        Ok(self.write(&content)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<DocumentValue>,
    saves: usize,
    fail_writes: bool,
}

/// In-process store document.
///
/// Clones share the same document, so a test can keep a handle after moving
/// the storage into a store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    /// Empty storage; loading fails until something is saved.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: DocumentValue) -> Self {
        let storage = Self::new();
        storage.state.lock().document = Some(document);
        storage
    }

    /// The stored document, if any.
    pub fn document(&self) -> Option<DocumentValue> {
        self.state.lock().document.clone()
    }

    /// Replace the stored document behind the store's back.
    pub fn replace(&self, document: DocumentValue) {
        self.state.lock().document = Some(document);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.state.lock().saves
    }

    /// Make every following save fail with [`ProfileError::Io`].
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

impl DocumentStorage for MemoryStorage {
    fn load_document(&self) -> Result<DocumentValue, ProfileError> {
        self.state
            .lock()
            .document
            .clone()
            .ok_or_else(|| ProfileError::io(self.location(), "no document stored"))
    }

    fn save_document(&mut self, document: &DocumentValue) -> Result<(), ProfileError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(ProfileError::io(self.location(), "writes disabled"));
        }
        state.document = Some(document.clone());
        state.saves = state.saves.saturating_add(1);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
