//! shmstore Core Library
//!
//! Keyed shared memory store: byte strings written under a string identifier
//! land in a fixed-size System V segment whose key is the CRC32 of the
//! identifier, so any process using the same identifier sees the same data.
//!
//! ```no_run
//! use shmstore_core::{SharedMemory, SharedMemoryStore};
//!
//! # fn main() -> shmstore_core::StoreResult<()> {
//! let mut store = SharedMemoryStore::default();
//! store.write(b"hello", "session-42")?;
//! assert_eq!(store.read("session-42")?, b"hello");
//! assert!(store.delete("session-42"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod shm;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, StoreConfig};
pub use error::{HardValidationError, SegmentError, StoreError, StoreResult};
pub use store::{SharedMemory, SharedMemoryStore};
pub use types::{Capacity, SegmentKey, DEFAULT_CAPACITY};
