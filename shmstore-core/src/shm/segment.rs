// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Segment - System V shared memory handle.
//!
//! Provides a safe owned wrapper over shmget/shmat/shmdt/shmctl.
//! All unsafe operations are encapsulated with bounds checking.

use std::ptr::{self, NonNull};

use nix::errno::Errno;

use crate::error::SegmentError;
use crate::types::SegmentKey;

/// An attached System V shared memory segment.
///
/// This struct owns the attachment and will detach it on drop. Dropping never
/// destroys the segment itself; that only happens through [`Segment::destroy`].
/// Any process deriving the same key attaches to the same physical memory.
#[derive(Debug)]
pub struct Segment {
    /// Key the segment was opened with.
    key: SegmentKey,
    /// Identifier returned by shmget.
    shm_id: libc::c_int,
    /// Start of the attached mapping.
    addr: NonNull<u8>,
    /// Size of the segment in bytes.
    size: usize,
}

// SAFETY: Segment exclusively owns its attachment; moving it to another thread
// moves that ownership. It is not Sync, all access goes through &self/&mut self.
unsafe impl Send for Segment {}

impl Segment {
    /// Permission bits for created segments (rw-r--r--).
    pub const MODE: libc::c_int = 0o644;

    /// Attach to the segment for `key`, creating it with `size` bytes if absent.
    ///
    /// Key 0 is `IPC_PRIVATE`: the OS then creates a fresh segment on every
    /// call that no other handle or process can reach.
    ///
    /// # Errors
    /// Fails if the OS refuses to create or attach the segment, or if an
    /// existing segment has a size other than `size`.
    pub fn open_or_create(key: SegmentKey, size: usize) -> Result<Self, SegmentError> {
        if key.is_private() {
            tracing::warn!(key = %key, "Private segment key, segment will not be shared");
        }

        // SAFETY: shmget takes plain integer arguments.
        let shm_id = unsafe { libc::shmget(key.as_raw(), size, libc::IPC_CREAT | Self::MODE) };
        if shm_id < 0 {
            return Err(SegmentError::Get {
                key,
                size,
                errno: Errno::last(),
            });
        }

        // A larger pre-existing segment satisfies shmget, so check the real size.
        let actual = Self::stat_size(key, shm_id)?;
        if actual != size {
            return Err(SegmentError::SizeMismatch {
                key,
                expected: size,
                actual,
            });
        }

        // SAFETY: shm_id is valid, a null address lets the kernel pick the mapping.
        let raw = unsafe { libc::shmat(shm_id, ptr::null(), 0) };
        if raw as isize == -1 {
            return Err(SegmentError::Attach {
                key,
                errno: Errno::last(),
            });
        }

        let addr = NonNull::new(raw as *mut u8).ok_or(SegmentError::Attach {
            key,
            errno: Errno::EFAULT,
        })?;

        tracing::debug!(key = %key, shm_id = shm_id, size = size, "Attached shared memory segment");

        Ok(Self {
            key,
            shm_id,
            addr,
            size,
        })
    }

    fn stat_size(key: SegmentKey, shm_id: libc::c_int) -> Result<usize, SegmentError> {
        let mut ds = std::mem::MaybeUninit::<libc::shmid_ds>::zeroed();
        // SAFETY: ds points to writable memory large enough for shmid_ds.
        let result = unsafe { libc::shmctl(shm_id, libc::IPC_STAT, ds.as_mut_ptr()) };
        if result < 0 {
            return Err(SegmentError::Stat {
                key,
                errno: Errno::last(),
            });
        }
        // SAFETY: IPC_STAT succeeded and filled the struct.
        let ds = unsafe { ds.assume_init() };
        Ok(ds.shm_segsz as usize)
    }

    /// Get the key of this segment.
    pub fn key(&self) -> SegmentKey {
        self.key
    }

    /// Start of the attached mapping.
    #[cfg(test)]
    pub(crate) fn addr(&self) -> *const libc::c_void {
        self.addr.as_ptr() as *const libc::c_void
    }

    /// Get the size of this segment.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Copy `data` into the segment starting at `offset`.
    ///
    /// Copies at most `size - offset` bytes and returns how many were written.
    /// Bytes past the written range keep their previous contents.
    pub fn write_at(&mut self, offset: usize, data: &[u8]) -> Result<usize, SegmentError> {
        if offset > self.size {
            return Err(SegmentError::OutOfBounds {
                offset,
                size: self.size,
            });
        }

        let count = data.len().min(self.size - offset);
        // SAFETY: offset + count <= size and the mapping is size bytes long.
        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), self.addr.as_ptr().add(offset), count);
        }
        Ok(count)
    }

    /// Copy the whole segment out.
    pub fn read(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.size];
        // SAFETY: the mapping is size bytes long and buf has the same length.
        unsafe {
            ptr::copy_nonoverlapping(self.addr.as_ptr(), buf.as_mut_ptr(), self.size);
        }
        buf
    }

    /// Mark the segment for destruction and detach from it.
    ///
    /// The kernel frees the memory once every process has detached.
    pub fn destroy(self) -> Result<(), SegmentError> {
        // SAFETY: shm_id came from a successful shmget; IPC_RMID ignores buf.
        let result = unsafe { libc::shmctl(self.shm_id, libc::IPC_RMID, ptr::null_mut()) };
        if result < 0 {
            return Err(SegmentError::Destroy {
                key: self.key,
                errno: Errno::last(),
            });
        }

        tracing::debug!(key = %self.key, shm_id = self.shm_id, "Destroyed shared memory segment");
        Ok(())
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        // SAFETY: addr was returned by shmat and has not been detached yet.
        let result = unsafe { libc::shmdt(self.addr.as_ptr() as *const libc::c_void) };
        if result < 0 {
            tracing::error!(
                key = %self.key,
                error = %Errno::last(),
                "Failed to detach shared memory segment"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_key(label: &str) -> SegmentKey {
        SegmentKey::from_identifier(&format!(
            "segment-test-{}-{}",
            label,
            std::process::id()
        ))
    }

    #[test]
    fn test_private_key_creates_unshared_segment() {
        let key = SegmentKey::from_identifier("");
        let mut first = Segment::open_or_create(key, 64).unwrap();
        let second = Segment::open_or_create(key, 64).unwrap();

        first.write_at(0, b"private").unwrap();
        assert_eq!(&first.read()[..7], b"private");
        assert!(second.read().iter().all(|&b| b == 0));

        second.destroy().unwrap();
        first.destroy().unwrap();
    }

    #[test]
    fn test_new_segment_is_zero_filled() {
        let segment = Segment::open_or_create(unique_key("zero"), 64).unwrap();
        assert_eq!(segment.size(), 64);
        assert!(segment.read().iter().all(|&b| b == 0));
        segment.destroy().unwrap();
    }

    #[test]
    fn test_write_clips_to_segment_size() {
        let mut segment = Segment::open_or_create(unique_key("clip"), 8).unwrap();

        assert_eq!(segment.write_at(0, b"0123456789").unwrap(), 8);
        assert_eq!(segment.read(), b"01234567");

        assert_eq!(segment.write_at(6, b"xyz").unwrap(), 2);
        assert_eq!(segment.read(), b"012345xy");

        assert_eq!(segment.write_at(8, b"z").unwrap(), 0);
        assert!(matches!(
            segment.write_at(9, b"z"),
            Err(SegmentError::OutOfBounds { offset: 9, size: 8 })
        ));

        segment.destroy().unwrap();
    }

    #[test]
    fn test_short_write_keeps_tail() {
        let mut segment = Segment::open_or_create(unique_key("tail"), 8).unwrap();
        segment.write_at(0, b"abcdefgh").unwrap();
        segment.write_at(0, b"XY").unwrap();
        assert_eq!(segment.read(), b"XYcdefgh");
        segment.destroy().unwrap();
    }

    #[test]
    fn test_two_handles_share_memory() {
        let key = unique_key("share");
        let mut first = Segment::open_or_create(key, 32).unwrap();
        let second = Segment::open_or_create(key, 32).unwrap();

        first.write_at(0, b"shared").unwrap();
        assert_eq!(&second.read()[..6], b"shared");

        drop(second);
        first.destroy().unwrap();
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let key = unique_key("mismatch");
        let segment = Segment::open_or_create(key, 64).unwrap();

        // Smaller request: shmget succeeds, size check fails.
        assert!(matches!(
            Segment::open_or_create(key, 32),
            Err(SegmentError::SizeMismatch {
                expected: 32,
                actual: 64,
                ..
            })
        ));
        // Larger request: shmget itself fails.
        assert!(matches!(
            Segment::open_or_create(key, 128),
            Err(SegmentError::Get { .. })
        ));

        segment.destroy().unwrap();
    }
}
