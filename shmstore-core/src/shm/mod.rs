// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Shared memory primitives.
//!
//! System V segments addressed by integer key, plus the fixed-size
//! padding used to store variable-length payloads in them.

pub mod padding;
mod segment;

pub use segment::Segment;
