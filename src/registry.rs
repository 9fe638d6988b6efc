//! Handle-based buffer surface
//!
//! Buffers are owned by a [`BufferRegistry`] and addressed through copyable
//! [`BufferHandle`]s. Handle ids are never reused, so once a handle has been
//! destroyed every later call with it reports `InvalidHandle`.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::errors::{Result, RingBufferError};
use crate::ring::RingBuffer;

/// Opaque identifier for a buffer owned by a [`BufferRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(u64);

impl BufferHandle {
    /// Rebuild a handle from its raw id
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of every buffer created through the handle surface
pub struct BufferRegistry<T> {
    buffers: HashMap<BufferHandle, RingBuffer<T>>,
    next_id: u64,
}

impl<T> Default for BufferRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BufferRegistry<T> {
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            next_id: 1,
        }
    }

    /// Release the buffer behind `handle`.
    ///
    /// Succeeds once per handle. The handle value itself is not touched; any
    /// later use of it, including a second destroy, fails with
    /// `InvalidHandle`.
    pub fn destroy(&mut self, handle: BufferHandle) -> Result<()> {
        match self.buffers.remove(&handle) {
            Some(buffer) => {
                buffer.destroy();
                debug!(%handle, live = self.buffers.len(), "buffer handle destroyed");
                Ok(())
            }
            None => {
                warn!(%handle, "destroy called on invalid buffer handle");
                Err(RingBufferError::InvalidHandle { handle })
            }
        }
    }

    pub fn get(&self, handle: BufferHandle) -> Result<&RingBuffer<T>> {
        self.buffers
            .get(&handle)
            .ok_or(RingBufferError::InvalidHandle { handle })
    }

    pub fn get_mut(&mut self, handle: BufferHandle) -> Result<&mut RingBuffer<T>> {
        self.buffers
            .get_mut(&handle)
            .ok_or(RingBufferError::InvalidHandle { handle })
    }

    pub fn contains(&self, handle: BufferHandle) -> bool {
        self.buffers.contains_key(&handle)
    }

    pub fn occupancy(&self, handle: BufferHandle) -> Result<usize> {
        Ok(self.get(handle)?.occupancy())
    }

    pub fn free_space(&self, handle: BufferHandle) -> Result<usize> {
        Ok(self.get(handle)?.free_space())
    }

    /// Number of live buffers
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl<T: Copy + Default> BufferRegistry<T> {
    /// Allocate a buffer of `capacity` samples and return its handle.
    pub fn create(&mut self, capacity: usize) -> Result<BufferHandle> {
        let buffer = RingBuffer::new(capacity)?;
        let handle = BufferHandle(self.next_id);
        self.next_id += 1;
        self.buffers.insert(handle, buffer);
        debug!(%handle, capacity, "buffer handle created");
        Ok(handle)
    }

    pub fn write(&mut self, handle: BufferHandle, samples: &[T]) -> Result<()> {
        self.get_mut(handle)?.write(samples)
    }

    pub fn read(&mut self, handle: BufferHandle, n: usize) -> Result<Vec<T>> {
        self.get_mut(handle)?.read(n)
    }

    pub fn read_into(&mut self, handle: BufferHandle, out: &mut [T]) -> Result<()> {
        self.get_mut(handle)?.read_into(out)
    }
}
