//! cbuffer - fixed-capacity sample ring buffer
//!
//! A single-producer/single-consumer circular buffer over fixed-size samples
//! with all-or-nothing bulk reads and writes.
//!
//! - **Ring**: `capacity + 1` slots and two cursors; the spare slot keeps full
//!   and empty apart without a counter
//! - **Registry**: handle-based surface with double-destroy detection
//! - **Config**: TOML + environment overrides
//! - **Telemetry**: `tracing` subscriber helpers
//!
//! # Quick Start
//!
//! ```
//! use cbuffer::{RingBuffer, Sample};
//!
//! let mut buf = RingBuffer::<Sample>::new(10)?;
//! buf.write(&[1, 2, 3])?;
//! assert_eq!(buf.occupancy(), 3);
//! assert_eq!(buf.free_space(), 7);
//! assert_eq!(buf.read(2)?, vec![1, 2]);
//! # Ok::<(), cbuffer::RingBufferError>(())
//! ```

pub mod config;
pub mod errors;
pub mod registry;
pub mod ring;
pub mod telemetry;

pub use config::RingConfig;
pub use errors::{Result, RingBufferError};
pub use registry::{BufferHandle, BufferRegistry};
pub use ring::{RingBuffer, Sample};
