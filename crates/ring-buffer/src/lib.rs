//! Reading Window
//!
//! Provides the bounded FIFO buffer that backs every sensor's rolling average.

mod buffer;

pub use buffer::{RingBuffer, DEFAULT_CAPACITY};

use thiserror::Error;

/// Errors when constructing a window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Capacity must hold at least one reading
    #[error("Window capacity must be greater than zero")]
    ZeroCapacity,
}
