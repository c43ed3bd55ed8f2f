//! stream/mod.rs
//! Growable output buffer protocol shared by streaming encode and decode.

pub mod buffer;
pub mod protocol;

pub use buffer::GrowBuffer;
pub use protocol::{drive, NextAction, StepReport, StreamOutput, StreamStep};

use crate::constants::INITIAL_OUTPUT_CAPACITY;

/// Buffer policy for streaming calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// First destination size offered to the engine.
    pub initial_capacity: usize,
    /// Hard ceiling for the destination; `None` means unbounded.
    pub max_capacity: Option<usize>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_OUTPUT_CAPACITY, // small: the protocol grows on demand
            max_capacity: None,
        }
    }
}

impl StreamConfig {
    pub fn new(initial_capacity: Option<usize>, max_capacity: Option<usize>) -> Self {
        Self {
            initial_capacity: initial_capacity.unwrap_or(INITIAL_OUTPUT_CAPACITY),
            max_capacity,
        }
    }
}
