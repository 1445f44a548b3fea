// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmstore read` command - Print the value stored under an identifier.
//!
//! An identifier with no segment yet gets an empty one created.

use std::io::Write;

use shmstore_core::SharedMemory;

use super::Settings;

pub fn execute(settings: &Settings, identifier: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = settings.open_store()?;
    let value = store.read(identifier)?;

    tracing::debug!(identifier = %identifier, bytes = value.len(), "Read value");

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&value)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
