//! Saving and reloading the shape list.
//!
//! The whole list is written as one JSON array into a single named slot of a
//! key-value store. Reloading parses the complete payload before anything is
//! applied, so a bad payload changes nothing.

use std::collections::HashMap;

use crate::app_state::State;
use crate::drawing::Shape;
use crate::notification::{Notification, Severity};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("there are no shapes to save")]
    Empty,
    #[error("nothing saved under {0:?}")]
    NothingSaved(String),
    #[error("malformed drawing payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The browser's `localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> anyhow::Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no browser window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow::anyhow!("localStorage unavailable: {e:?}"))?
            .ok_or_else(|| anyhow::anyhow!("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("failed to read {key:?}: {e:?}"))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("failed to write {key:?}: {e:?}"))
    }
}

/// Writes `shapes` under `key`. An empty list is rejected without touching the store.
pub fn save_shapes(shapes: &[Shape], store: &mut dyn KeyValueStore, key: &str) -> Result<(), PersistError> {
    if shapes.is_empty() {
        return Err(PersistError::Empty);
    }
    let data = serde_json::to_string(shapes)?;
    store.set(key, &data)?;
    Ok(())
}

/// Reads the full list saved under `key`. Fails as a whole on any malformed record.
pub fn load_shapes(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Shape>, PersistError> {
    let data = store
        .get(key)?
        .ok_or_else(|| PersistError::NothingSaved(key.to_string()))?;
    Ok(serde_json::from_str(&data)?)
}

impl State {
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Notification {
        match save_shapes(&self.shapes, store, &self.config.storage_key) {
            Ok(()) => {
                log::info!("saved {} shapes to {:?}", self.shapes.len(), self.config.storage_key);
                Notification::new(Severity::Success, "Your drawing has been saved successfully.")
            }
            Err(PersistError::Empty) => {
                log::warn!("save rejected: no shapes");
                Notification::new(Severity::Error, "There's nothing to save yet. Start drawing!")
            }
            Err(err) => {
                log::error!("save failed: {err}");
                Notification::new(Severity::Error, "Something went wrong while saving.")
            }
        }
    }

    /// Re-creates every saved shape with its original id, in saved order.
    pub fn reload(&mut self, store: &dyn KeyValueStore) -> Notification {
        match load_shapes(store, &self.config.storage_key) {
            Ok(shapes) => {
                log::info!("reloaded {} shapes from {:?}", shapes.len(), self.config.storage_key);
                for shape in shapes {
                    self.create(shape);
                }
                Notification::new(Severity::Info, "Your saved drawing has been reloaded.")
            }
            Err(PersistError::NothingSaved(key)) => {
                log::warn!("reload: nothing saved under {key:?}");
                Notification::new(Severity::Warning, "Looks like you haven't saved anything yet.")
            }
            Err(err) => {
                log::error!("reload failed: {err}");
                Notification::new(Severity::Error, "Something went wrong while loading.")
            }
        }
    }
}
