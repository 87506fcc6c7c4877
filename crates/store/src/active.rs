//! Remembered block set selection

use blockfit_core::BlockSetRegistry;

use crate::kv::{KeyValueStore, StoreError};

pub const ACTIVE_BLOCK_SET_KEY: &str = "blockgame.activeBlockSet";

/// The last block set the player chose, stored as a bare id string
pub struct ActiveBlockSet<S> {
    store: S,
    fallback: String,
}

impl<S: KeyValueStore> ActiveBlockSet<S> {
    /// `fallback` is returned while nothing has been stored
    pub fn new(store: S, fallback: impl Into<String>) -> Self {
        Self {
            store,
            fallback: fallback.into(),
        }
    }

    pub fn get(&self) -> String {
        match self.store.get(ACTIVE_BLOCK_SET_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => id.trim().to_string(),
            Ok(_) => self.fallback.clone(),
            Err(e) => {
                eprintln!("[Store] failed to read active block set: {}", e);
                self.fallback.clone()
            }
        }
    }

    /// Stored id resolved through `registry`, so a deleted custom set yields the default
    pub fn resolve(&self, registry: &BlockSetRegistry) -> String {
        registry.resolve(&self.get()).id.clone()
    }

    pub fn set(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.set(ACTIVE_BLOCK_SET_KEY, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_active_block_set() {
        let mut active = ActiveBlockSet::new(MemoryStore::new(), "classic");
        assert_eq!(active.get(), "classic");
        active.set("custom-gone").unwrap();
        assert_eq!(active.get(), "custom-gone");
        assert_eq!(active.resolve(&BlockSetRegistry::new()), "classic");
        active.set("expanded").unwrap();
        assert_eq!(active.resolve(&BlockSetRegistry::new()), "expanded");
    }
}
