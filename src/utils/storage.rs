use crate::error::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const APP_PORT_KEY: &str = "appPort";
pub const CURRENT_DATABASE_KEY: &str = "database";

/// Key/value store the host keeps for the UI (port of the backend, the
/// currently selected database, ...).
pub trait UiStorage: Send + Sync {
    fn get_field(&self, key: &str) -> Result<Option<Value>>;
    fn set_field(&self, key: &str, value: Value) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    fields: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn with_field(self, key: &str, value: Value) -> Self {
        self.fields
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value);
        self
    }
}

impl UiStorage for MemoryStorage {
    fn get_field(&self, key: &str) -> Result<Option<Value>> {
        let fields = self.fields.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(fields.get(key).cloned())
    }

    fn set_field(&self, key: &str, value: Value) -> Result<()> {
        let mut fields = self.fields.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        fields.insert(key.to_string(), value);
        Ok(())
    }
}

// JSON object on disk, re-read on every access so edits made by other
// processes are picked up.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(fields) => Ok(fields),
            _ => {
                log::warn!(
                    "Storage file {} does not hold a JSON object, treating it as empty",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    fn save(&self, fields: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, fields)?;
        Ok(())
    }
}

impl UiStorage for FileStorage {
    fn get_field(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn set_field(&self, key: &str, value: Value) -> Result<()> {
        let mut fields = self.load()?;
        fields.insert(key.to_string(), value);
        self.save(&fields)
    }
}
