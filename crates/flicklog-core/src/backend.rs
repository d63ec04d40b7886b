use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Raw key-value persistence the record store is built on.
///
/// Views and commands depend on this abstraction rather than a concrete
/// global, so the whole store contract is unit-testable against the in-memory
/// backend.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, payload: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key backend: each key lives in `<dir>/<key>.json`.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create library directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.key_path(key);
        // Write to a temp file and rename so a crash mid-write never leaves a
        // truncated collection behind.
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, payload)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw payload, bypassing the store. Used to simulate corrupted
    /// or legacy persisted state.
    pub fn seed(&self, key: &str, payload: &str) {
        self.data
            .lock()
            .expect("memory backend poisoned")
            .insert(key.to_string(), payload.to_string());
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .data
            .lock()
            .expect("memory backend poisoned")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.data
            .lock()
            .expect("memory backend poisoned")
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data
            .lock()
            .expect("memory backend poisoned")
            .remove(key);
        Ok(())
    }
}
