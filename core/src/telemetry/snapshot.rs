//! telemetry/snapshot.rs
//! Immutable view of counters with derived ratios, for reporting.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::StreamCounters;
use crate::types::Direction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub direction: String,
    pub calls: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub buffer_grows: u64,
    pub peak_capacity: u64,
    pub frames_ended: u64,
    /// `bytes_out / bytes_in`, 0 when nothing was fed.
    pub ratio: f64,
    /// Average growths per call.
    pub grows_per_call: f64,
}

impl CountersSnapshot {
    pub fn from_counters(counters: &StreamCounters, direction: Direction) -> Self {
        let ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };
        let grows_per_call = if counters.calls > 0 {
            counters.buffer_grows as f64 / counters.calls as f64
        } else {
            0.0
        };
        Self {
            direction: direction.to_string(),
            calls: counters.calls,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            buffer_grows: counters.buffer_grows,
            peak_capacity: counters.peak_capacity,
            frames_ended: counters.frames_ended,
            ratio,
            grows_per_call,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
