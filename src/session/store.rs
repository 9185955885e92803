use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ClientError, ClientResult};

/// Durable key-value storage for the session keys.
///
/// Values outlive the process. There is no expiry metadata; a stale token is
/// only discovered when the backend answers 401.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// JSON file store kept in the CLI config directory
pub struct FileSessionStore {
    path: PathBuf,
    // serializes read-modify-write of the file within this process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn new(config_dir: impl Into<PathBuf>) -> ClientResult<Self> {
        let config_dir = config_dir.into();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }
        Ok(Self {
            path: config_dir.join(Self::FILE_NAME),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> ClientResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, values: &HashMap<String, String>) -> ClientResult<()> {
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn guard(&self) -> ClientResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| ClientError::Storage("session file lock poisoned".to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.guard()?;
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.guard()?;
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = self.guard()?;
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

/// Process-local store, used by tests and one-shot invocations
#[derive(Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| ClientError::Storage("memory store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.values()?.remove(key);
        Ok(())
    }
}
