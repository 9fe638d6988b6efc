//! Fixed-capacity sample ring buffer
//!
//! Storage holds `capacity + 1` slots. The extra slot is never filled: the
//! write cursor is not allowed to catch up with the read cursor, so
//! `read_index == write_index` always means empty and a buffer holding
//! `capacity` samples is full. No occupancy counter is kept.

use std::fmt;

use tracing::{debug, trace};

use crate::config::RingConfig;
use crate::errors::{Result, RingBufferError};

/// Reference element type: one unsigned sample.
pub type Sample = u32;

/// Single-producer/single-consumer ring buffer with all-or-nothing bulk
/// transfers.
pub struct RingBuffer<T> {
    capacity: usize,
    storage: Box<[T]>,
    write_index: usize,
    read_index: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Allocate a buffer able to hold `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self> {
        let slots = capacity
            .checked_add(1)
            .ok_or(RingBufferError::AllocationFailure {
                requested: capacity,
            })?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(slots)
            .map_err(|_| RingBufferError::AllocationFailure {
                requested: capacity,
            })?;
        storage.resize(slots, T::default());

        debug!(capacity, "ring buffer created");
        Ok(Self {
            capacity,
            storage: storage.into_boxed_slice(),
            write_index: 0,
            read_index: 0,
        })
    }

    /// Allocate a buffer sized by `config.capacity`.
    pub fn from_config(config: &RingConfig) -> Result<Self> {
        Self::new(config.capacity)
    }

    /// Append all of `samples`, or nothing if they do not fit.
    pub fn write(&mut self, samples: &[T]) -> Result<()> {
        let requested = samples.len();
        let available = self.free_space();
        if requested > available {
            trace!(requested, available, "write rejected");
            return Err(RingBufferError::InsufficientSpace {
                requested,
                available,
            });
        }
        if requested == 0 {
            return Ok(());
        }

        let start = self.write_index;
        let head = requested.min(self.slots() - start);
        self.storage[start..start + head].copy_from_slice(&samples[..head]);
        self.storage[..requested - head].copy_from_slice(&samples[head..]);
        self.write_index = self.advance(start, requested);

        trace!(count = requested, occupancy = self.occupancy(), "samples written");
        Ok(())
    }

    /// Take exactly `n` samples in FIFO order, or nothing if fewer are
    /// readable.
    pub fn read(&mut self, n: usize) -> Result<Vec<T>> {
        self.ensure_readable(n)?;
        let mut out = vec![T::default(); n];
        self.copy_out(&mut out);
        Ok(out)
    }

    /// Fill `out` completely with the oldest samples, or leave both `out` and
    /// the buffer untouched if fewer than `out.len()` are readable.
    pub fn read_into(&mut self, out: &mut [T]) -> Result<()> {
        self.ensure_readable(out.len())?;
        self.copy_out(out);
        Ok(())
    }

    fn copy_out(&mut self, out: &mut [T]) {
        let n = out.len();
        if n == 0 {
            return;
        }

        let start = self.read_index;
        let head = n.min(self.slots() - start);
        out[..head].copy_from_slice(&self.storage[start..start + head]);
        out[head..].copy_from_slice(&self.storage[..n - head]);
        // Consumed slots keep their values until overwritten.
        self.read_index = self.advance(start, n);

        trace!(count = n, occupancy = self.occupancy(), "samples read");
    }
}

impl<T> RingBuffer<T> {
    /// Usable capacity in samples. The backing store is one slot larger.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples ready to be read.
    pub fn occupancy(&self) -> usize {
        if self.write_index >= self.read_index {
            self.write_index - self.read_index
        } else {
            self.write_index + self.slots() - self.read_index
        }
    }

    /// Number of samples that can be written before the buffer is full.
    pub fn free_space(&self) -> usize {
        let gap = if self.read_index > self.write_index {
            self.read_index - self.write_index
        } else {
            self.read_index + self.slots() - self.write_index
        };
        // The sentinel slot is never writable.
        gap - 1
    }

    pub fn is_empty(&self) -> bool {
        self.read_index == self.write_index
    }

    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    /// Discard all readable samples. Slot contents are left in place.
    pub fn clear(&mut self) {
        self.read_index = 0;
        self.write_index = 0;
    }

    /// Release the buffer and its storage.
    pub fn destroy(self) {
        debug!(capacity = self.capacity, "ring buffer destroyed");
    }

    fn slots(&self) -> usize {
        self.storage.len()
    }

    /// `(index + n) mod slots` without overflowing, for `index < slots` and
    /// `n <= slots`.
    fn advance(&self, index: usize, n: usize) -> usize {
        let to_end = self.slots() - index;
        if n >= to_end {
            n - to_end
        } else {
            index + n
        }
    }

    fn ensure_readable(&self, requested: usize) -> Result<()> {
        let available = self.occupancy();
        if requested > available {
            trace!(requested, available, "read rejected");
            return Err(RingBufferError::InsufficientData {
                requested,
                available,
            });
        }
        Ok(())
    }
}

impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("occupancy", &self.occupancy())
            .field("free_space", &self.free_space())
            .finish()
    }
}
