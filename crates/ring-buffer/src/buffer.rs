//! Ring Buffer Implementation

use crate::WindowError;
use std::collections::VecDeque;

/// Default window capacity (readings)
pub const DEFAULT_CAPACITY: usize = 5;

/// Fixed-capacity FIFO of readings; the oldest value is evicted first
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer {
    /// Stored readings, oldest at the front
    values: VecDeque<f64>,
    /// Capacity of the buffer
    capacity: usize,
    /// Total values pushed (for statistics)
    total_written: usize,
}

impl RingBuffer {
    /// Create a new ring buffer with given capacity
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
            total_written: 0,
        })
    }

    /// Create a buffer with default capacity (5 readings)
    pub fn with_default_capacity() -> Self {
        Self {
            values: VecDeque::with_capacity(DEFAULT_CAPACITY + 1),
            capacity: DEFAULT_CAPACITY,
            total_written: 0,
        }
    }

    /// Push a value into the buffer (evicts the oldest if over capacity)
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }
        self.total_written += 1;
    }

    /// Arithmetic mean of the stored values, 0.0 when empty
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Get the number of values currently in the buffer
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate stored values, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Most recent value
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Get total values written (for statistics)
    pub fn total_written(&self) -> usize {
        self.total_written
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(RingBuffer::new(0), Err(WindowError::ZeroCapacity));
    }

    #[test]
    fn test_push_and_mean() {
        let mut buffer = RingBuffer::new(10).unwrap();

        for v in [1.0, 2.0, 3.0, 4.0] {
            buffer.push(v);
        }

        assert_eq!(buffer.len(), 4);
        assert!((buffer.mean() - 2.5).abs() < 1e-12);
        assert_eq!(buffer.latest(), Some(4.0));
    }

    #[test]
    fn test_empty_mean_is_zero() {
        let buffer = RingBuffer::default();
        assert_eq!(buffer.mean(), 0.0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut buffer = RingBuffer::new(3).unwrap();

        for i in 0..10 {
            buffer.push(i as f64);
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![7.0, 8.0, 9.0]);
        assert_eq!(buffer.total_written(), 10);
    }

    #[test]
    fn test_clear_keeps_statistics() {
        let mut buffer = RingBuffer::new(2).unwrap();
        buffer.push(1.0);
        buffer.push(2.0);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.mean(), 0.0);
        assert_eq!(buffer.total_written(), 2);
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(
            capacity in 1usize..16,
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 0..64),
        ) {
            let mut buffer = RingBuffer::new(capacity).unwrap();
            for v in &values {
                buffer.push(*v);
                prop_assert!(buffer.len() <= buffer.capacity());
            }
        }

        #[test]
        fn prop_keeps_most_recent_values(
            capacity in 1usize..16,
            values in proptest::collection::vec(-1.0e6f64..1.0e6, 0..64),
        ) {
            let mut buffer = RingBuffer::new(capacity).unwrap();
            for v in &values {
                buffer.push(*v);
            }
            let start = values.len().saturating_sub(capacity);
            let expected: Vec<f64> = values[start..].to_vec();
            prop_assert_eq!(buffer.iter().collect::<Vec<_>>(), expected);
        }
    }
}
