// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmstore write` command - Store a value under an identifier.
//!
//! The segment stays in place after the process exits.

use shmstore_core::{SharedMemory, SharedMemoryStore};

use super::Settings;

pub fn execute(
    settings: &Settings,
    identifier: &str,
    data: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = settings.open_store()?;

    tracing::info!(identifier = %identifier, bytes = data.len(), "Writing value");
    store.write(data.as_bytes(), identifier)?;

    println!(
        "✓ Wrote {} bytes to '{}' (key {}, capacity {})",
        data.len(),
        identifier,
        SharedMemoryStore::key_for(identifier),
        store.capacity()
    );
    Ok(())
}
