//! Scratch Buffer Module
//!
//! A fixed-capacity output buffer handed explicitly to each encode call.
//!
//! The backing storage is allocated once, at full capacity, the first time
//! the buffer is used and is reused by later calls. Every write reserves its
//! bytes first; a reservation past the capacity fails with
//! [`CodecError::BufferOverflow`]. Encoding takes `&mut ScratchBuffer`, so a
//! buffer can only serve one encode at a time.

use crate::error::CodecError;

/// Reusable fixed-capacity encode buffer
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl ScratchBuffer {
    /// Create a buffer that accepts up to `capacity` bytes
    ///
    /// Nothing is allocated until the first encode.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            capacity,
        }
    }

    /// Maximum number of bytes one encode may write
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written by the last successful encode
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Take the written bytes, leaving the buffer empty and unallocated
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Discard written bytes, keeping the allocation
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Clear and make sure the full capacity is allocated
    pub(crate) fn prepare(&mut self) {
        self.buf.clear();
        if self.buf.capacity() < self.capacity {
            self.buf.reserve_exact(self.capacity);
        }
    }

    fn reserve(&mut self, additional: usize) -> Result<(), CodecError> {
        let needed = self.buf.len().saturating_add(additional);
        if needed > self.capacity {
            return Err(CodecError::BufferOverflow {
                capacity: self.capacity,
                needed,
            });
        }
        Ok(())
    }

    pub(crate) fn put_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.reserve(1)?;
        self.buf.push(value);
        Ok(())
    }

    pub(crate) fn put_tagged(&mut self, tag: u8, header: &[u8]) -> Result<(), CodecError> {
        self.reserve(1 + header.len())?;
        self.buf.push(tag);
        self.buf.extend_from_slice(header);
        Ok(())
    }

    pub(crate) fn put_slice(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.reserve(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}
