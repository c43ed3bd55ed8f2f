//! telemetry/counters.rs
//! Per-context counters for streaming calls.
//!
//! Counters are plain integers owned by the context (`&mut self` access), so
//! no atomics are needed. Merge per-context counters with `+=` for totals.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::stream::StreamOutput;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    /// Successful streaming or block calls.
    pub calls: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Destination buffer growths across all calls.
    pub buffer_grows: u64,
    /// Largest destination buffer offered to the engine.
    pub peak_capacity: u64,
    /// Frames seen to end (decode side only).
    pub frames_ended: u64,
}

impl StreamCounters {
    /// Record one driven streaming call.
    pub fn record_stream(&mut self, out: &StreamOutput) {
        self.calls += 1;
        self.bytes_in += out.consumed as u64;
        self.bytes_out += out.data.len() as u64;
        self.buffer_grows += out.grows as u64;
        self.peak_capacity = self.peak_capacity.max(out.peak_capacity as u64);
    }

    /// Record one single-shot call (block or dictionary frame).
    pub fn record_single(&mut self, bytes_in: usize, bytes_out: usize, capacity: usize) {
        self.calls += 1;
        self.bytes_in += bytes_in as u64;
        self.bytes_out += bytes_out as u64;
        self.peak_capacity = self.peak_capacity.max(capacity as u64);
    }

    pub fn record_frame_end(&mut self) {
        self.frames_ended += 1;
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.calls += other.calls;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.buffer_grows += other.buffer_grows;
        self.peak_capacity = self.peak_capacity.max(other.peak_capacity);
        self.frames_ended += other.frames_ended;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
