use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[cfg(target_arch = "wasm32")]
pub trait StoreBounds {}
#[cfg(target_arch = "wasm32")]
impl<T> StoreBounds for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait StoreBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> StoreBounds for T {}

/// String key/value persistence behind the wizard state.
///
/// Mirrors the browser `Storage` interface so the same wizard logic runs against
/// `localStorage`, a JSON file, or an in-memory map.
pub trait KeyValueStore: StoreBounds {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

// --- In-memory Implementation ---

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().map_err(|_| anyhow::anyhow!("MemoryStore lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().map_err(|_| anyhow::anyhow!("MemoryStore lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().map_err(|_| anyhow::anyhow!("MemoryStore lock poisoned"))?;
        items.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut items = self.items.lock().map_err(|_| anyhow::anyhow!("MemoryStore lock poisoned"))?;
        items.clear();
        Ok(())
    }
}

// --- Native Implementation ---

/// Persists all items as one JSON object in a file. Every write rewrites the file.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    lock: Mutex<()>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        use anyhow::Context;

        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        use anyhow::Context;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| anyhow::anyhow!("FileStore lock poisoned"))?;
        let mut items = self.load()?;
        f(&mut items);
        self.persist(&items)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| anyhow::anyhow!("FileStore lock poisoned"))?;
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| anyhow::anyhow!("FileStore lock poisoned"))?;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

// --- Web Implementation ---

#[cfg(target_arch = "wasm32")]
use anyhow::anyhow;

/// `window.localStorage`. Note that `clear` only drops the wizard's own keys,
/// other applications on the same origin keep theirs.
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct LocalStore {
    storage: web_sys::Storage,
    prefix: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("No window available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow!("localStorage error: {:?}", e))?
            .ok_or_else(|| anyhow!("localStorage is not available"))?;
        Ok(Self { storage, prefix: "rpg-" })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow!("getItem error: {:?}", e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow!("setItem error: {:?}", e))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| anyhow!("removeItem error: {:?}", e))
    }

    fn clear(&self) -> Result<()> {
        let len = self.storage.length().map_err(|e| anyhow!("length error: {:?}", e))?;
        let mut owned = Vec::new();
        for i in 0..len {
            if let Ok(Some(key)) = self.storage.key(i) {
                if key.starts_with(self.prefix) {
                    owned.push(key);
                }
            }
        }
        for key in owned {
            self.remove_item(&key)?;
        }
        Ok(())
    }
}
