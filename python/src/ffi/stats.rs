//! ffi/stats.rs

use pyo3::prelude::*;
use pyo3::types::PyDict;

use zstd_handle::{telemetry::CountersSnapshot, telemetry::StreamCounters, types::Direction};

pub fn stats_dict<'py>(
    py: Python<'py>,
    counters: &StreamCounters,
    direction: Direction,
) -> PyResult<Bound<'py, PyDict>> {
    let snap = CountersSnapshot::from_counters(counters, direction);
    let d = PyDict::new_bound(py);
    d.set_item("direction", snap.direction)?;
    d.set_item("calls", snap.calls)?;
    d.set_item("bytes_in", snap.bytes_in)?;
    d.set_item("bytes_out", snap.bytes_out)?;
    d.set_item("buffer_grows", snap.buffer_grows)?;
    d.set_item("peak_capacity", snap.peak_capacity)?;
    d.set_item("frames_ended", snap.frames_ended)?;
    d.set_item("ratio", snap.ratio)?;
    d.set_item("grows_per_call", snap.grows_per_call)?;
    Ok(d)
}
