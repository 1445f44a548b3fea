// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Fixed-size payload framing.
//!
//! Segment writes never clear bytes past their own length, so every payload is
//! right-padded to the full segment size before writing and trimmed on read.

use std::borrow::Cow;

/// Byte appended to payloads shorter than the segment.
pub const PAD_BYTE: u8 = b' ';

/// Bytes stripped from both ends of a segment on read.
///
/// Includes NUL so a segment that was never written reads back empty.
pub const TRIM_BYTES: &[u8] = b" \t\n\r\0\x0B";

/// Right-pad `data` with [`PAD_BYTE`] up to `size` bytes.
///
/// Data already `size` bytes or longer is returned unchanged, never truncated.
pub fn pad(data: &[u8], size: usize) -> Cow<'_, [u8]> {
    if data.len() >= size {
        return Cow::Borrowed(data);
    }

    let mut padded = Vec::with_capacity(size);
    padded.extend_from_slice(data);
    padded.resize(size, PAD_BYTE);
    Cow::Owned(padded)
}

/// Strip [`TRIM_BYTES`] from both ends of `raw`.
pub fn trim(raw: &[u8]) -> &[u8] {
    let is_trim = |b: &u8| TRIM_BYTES.contains(b);

    let start = raw.iter().position(|b| !is_trim(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_trim(b)).map_or(start, |i| i + 1);
    &raw[start..end]
}
