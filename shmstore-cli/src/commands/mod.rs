// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use shmstore_core::{Capacity, ConfigLoader, SharedMemoryStore, StoreConfig, StoreResult};

pub mod delete;
pub mod key;
pub mod read;
pub mod validate;
pub mod write;

/// Global options shared by the store commands.
pub struct Settings {
    pub config: Option<String>,
    pub capacity: Option<usize>,
}

impl Settings {
    /// Resolve the store configuration: file first, then the capacity override.
    pub fn store_config(&self) -> StoreResult<StoreConfig> {
        let mut store = match &self.config {
            Some(path) => ConfigLoader::load_file(path)?.store,
            None => StoreConfig::default(),
        };

        if let Some(capacity) = self.capacity {
            store.capacity = Capacity::new(capacity)?;
        }

        Ok(store)
    }

    /// Build a store from the resolved configuration.
    pub fn open_store(&self) -> StoreResult<SharedMemoryStore> {
        let config = self.store_config()?;
        tracing::debug!(capacity = %config.capacity, "Using store configuration");
        Ok(SharedMemoryStore::from_config(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings {
            config: None,
            capacity: None,
        };
        assert_eq!(settings.store_config().unwrap().capacity.bytes(), 256);
    }

    #[test]
    fn test_capacity_override() {
        let settings = Settings {
            config: None,
            capacity: Some(1024),
        };
        assert_eq!(settings.store_config().unwrap().capacity.bytes(), 1024);
    }

    #[test]
    fn test_invalid_capacity_override() {
        let settings = Settings {
            config: None,
            capacity: Some(0),
        };
        assert!(settings.store_config().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let settings = Settings {
            config: Some("/nonexistent/shmstore.yaml".to_string()),
            capacity: None,
        };
        assert!(settings.store_config().is_err());
    }
}
