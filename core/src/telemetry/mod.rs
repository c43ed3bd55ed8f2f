//! telemetry/mod.rs
//! Stream counters and their reporting snapshot.

pub mod counters;
pub mod snapshot;

pub use counters::StreamCounters;
pub use snapshot::CountersSnapshot;
