// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmstore key` command - Show the segment key for an identifier.

use shmstore_core::SharedMemoryStore;

pub fn execute(identifier: &str) -> Result<(), Box<dyn std::error::Error>> {
    let key = SharedMemoryStore::key_for(identifier);

    println!("Identifier: {}", identifier);
    println!("Key:        {} ({})", key, key.as_raw());
    if key.is_private() {
        println!("Warning:    key is IPC_PRIVATE, the segment is not shared between processes");
    }
    Ok(())
}
