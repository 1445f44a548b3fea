// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Smallest segment a store may manage: 1 byte.
const MIN_CAPACITY: usize = 1;
/// Largest segment a store may manage: 1 GB.
const MAX_CAPACITY: usize = 1024 * 1024 * 1024;

/// Default segment size in bytes.
pub const DEFAULT_CAPACITY: usize = 256;

/// System V key of the segment behind an identifier.
///
/// Derived as the CRC32 of the identifier's UTF-8 bytes, so the same identifier
/// resolves to the same segment in every store instance and every process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentKey(u32);

impl SegmentKey {
    /// Derive the key for an identifier.
    pub fn from_identifier(identifier: &str) -> Self {
        Self(crc32fast::hash(identifier.as_bytes()))
    }

    /// Get the raw checksum value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Key as passed to `shmget`. Values above `i32::MAX` wrap to negative keys.
    pub fn as_raw(&self) -> libc::key_t {
        self.0 as libc::key_t
    }

    /// Key 0 is `IPC_PRIVATE`, which always creates a fresh unshared segment.
    pub fn is_private(&self) -> bool {
        self.as_raw() == libc::IPC_PRIVATE
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<SegmentKey> for u32 {
    fn from(key: SegmentKey) -> Self {
        key.0
    }
}

/// Validated segment capacity in bytes.
/// Must be between MIN_CAPACITY and MAX_CAPACITY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Capacity(usize);

impl Capacity {
    /// Create a new Capacity with bounds validation.
    pub fn new(bytes: usize) -> Result<Self, HardValidationError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&bytes) {
            return Err(HardValidationError::CapacityOutOfBounds {
                capacity: bytes,
                min: MIN_CAPACITY,
                max: MAX_CAPACITY,
            });
        }
        Ok(Self(bytes))
    }

    /// Get the size in bytes.
    pub fn bytes(&self) -> usize {
        self.0
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_CAPACITY)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

impl TryFrom<usize> for Capacity {
    type Error = HardValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capacity> for usize {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}
