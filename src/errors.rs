use thiserror::Error;

use crate::registry::BufferHandle;

/// The error type for every ring buffer operation.
///
/// No variant implies a partial effect: whenever an operation returns one of
/// these, the buffer it was called on is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("Allocation failed for a ring buffer of {requested} samples")]
    AllocationFailure { requested: usize },

    #[error("Insufficient space: requested {requested} samples, {available} free")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("Insufficient data: requested {requested} samples, {available} readable")]
    InsufficientData { requested: usize, available: usize },

    #[error("Invalid or destroyed buffer handle: {handle}")]
    InvalidHandle { handle: BufferHandle },
}

impl RingBufferError {
    /// Whether the same call may succeed later once the other side of the
    /// buffer makes progress.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RingBufferError::InsufficientSpace { .. } | RingBufferError::InsufficientData { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RingBufferError>;
