// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmstore delete` command - Destroy the segment behind an identifier.
//!
//! A fresh process holds no handles, so the segment is opened first.
//! Opening uses create-or-attach: an identifier with no segment yet gets
//! one created just so it can be destroyed.

use shmstore_core::{SharedMemory, SharedMemoryStore};

use super::Settings;

pub fn execute(settings: &Settings, identifier: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = settings.open_store()?;
    store.open(identifier)?;

    if store.delete(identifier) {
        println!(
            "✓ Deleted '{}' (key {})",
            identifier,
            SharedMemoryStore::key_for(identifier)
        );
        Ok(())
    } else {
        eprintln!("✗ Failed to delete '{}'", identifier);
        std::process::exit(1);
    }
}
