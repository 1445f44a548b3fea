// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! shmstore Benchmarking Helpers
//!
//! Shared fixtures for the store benchmarks: segment capacities to sweep,
//! payload generation and per-process identifiers.

use shmstore_core::{Capacity, SharedMemoryStore, StoreResult};

/// Segment capacities to benchmark (in bytes).
pub const CAPACITIES: &[usize] = &[64, 256, 1024, 4096, 16384, 65536];

/// Identifier unique to this process and benchmark case.
pub fn bench_identifier(label: &str, capacity: usize) -> String {
    format!("bench-{}-{}-{}", label, capacity, std::process::id())
}

/// Payload filling half the segment, free of whitespace so it round-trips.
pub fn payload(capacity: usize) -> Vec<u8> {
    (0..capacity / 2).map(|i| b'a' + (i % 26) as u8).collect()
}

/// Store with the given capacity.
pub fn store(capacity: usize) -> StoreResult<SharedMemoryStore> {
    Ok(SharedMemoryStore::new(Capacity::new(capacity)?))
}
