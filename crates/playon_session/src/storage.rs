// --- File: crates/playon_session/src/storage.rs ---
//! Where the signed-in user survives between runs.

use playon_common::models::User;
use playon_common::{Context, PlayonError};
use playon_config::SessionConfig;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Raw persistence of the serialized user.
pub trait SessionStorage: Send + Sync {
    /// The stored text, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>, PlayonError>;

    fn save(&self, content: &str) -> Result<(), PlayonError>;

    fn clear(&self) -> Result<(), PlayonError>;
}

/// Interprets stored text as a user.
///
/// Empty text, `null`, `undefined` and records without an id are "no user".
/// Text that is not JSON at all is also "no user", with a warning.
pub fn decode_stored_user(content: &str) -> Option<User> {
    let content = content.trim();
    if content.is_empty() || content == "null" || content == "undefined" {
        return None;
    }
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            warn!("Ignoring unreadable stored session: {}", err);
            return None;
        }
    };
    match value.get("id") {
        None | Some(Value::Null) => return None,
        Some(Value::String(id)) if id.trim().is_empty() => return None,
        Some(_) => {}
    }
    serde_json::from_value(value)
        .map_err(|err| warn!("Ignoring stored session with invalid user: {}", err))
        .ok()
}

/// JSON file on disk; the parent directory is created on first save.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.storage_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<String>, PlayonError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn save(&self, content: &str) -> Result<(), PlayonError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, content).with_context(|| format!("writing {}", self.path.display()))
    }

    fn clear(&self) -> Result<(), PlayonError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => {
                Err(err).with_context(|| format!("removing {}", self.path.display()))
            }
            _ => Ok(()),
        }
    }
}

/// Keeps the session in memory only, for tests and one-off runs.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    content: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, PlayonError> {
        self.content
            .lock()
            .map_err(|_| PlayonError::InternalError("session storage lock poisoned".to_string()))
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>, PlayonError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, content: &str) -> Result<(), PlayonError> {
        *self.slot()? = Some(content.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), PlayonError> {
        *self.slot()? = None;
        Ok(())
    }
}
