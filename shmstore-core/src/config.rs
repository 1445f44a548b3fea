// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Any invalid field results in a HardValidationError before a store is built.

use std::path::Path;

use serde::Deserialize;

use crate::error::{HardValidationError, StoreError, StoreResult};
use crate::types::{Capacity, DEFAULT_CAPACITY};

/// Raw store configuration as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStoreConfig {
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for RawStoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    store: RawStoreConfig,
}

/// Validated store configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub capacity: Capacity,
}

/// Complete validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub store: StoreConfig,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> StoreResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(StoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> StoreResult<Config> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Self::validate(RawConfig::default());
        }

        let raw: RawConfig = serde_yaml::from_str(content).map_err(|e| StoreError::ConfigParse {
            message: format!("YAML parse error: {}", e),
        })?;

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> StoreResult<Config> {
        let store = Self::validate_store(raw.store)?;
        Ok(Config { store })
    }

    fn validate_store(raw: RawStoreConfig) -> StoreResult<StoreConfig> {
        let capacity =
            Capacity::new(raw.capacity).map_err(|e| HardValidationError::InvalidFieldValue {
                field: "store.capacity",
                value: raw.capacity.to_string(),
                reason: e.to_string(),
            })?;

        Ok(StoreConfig { capacity })
    }
}
