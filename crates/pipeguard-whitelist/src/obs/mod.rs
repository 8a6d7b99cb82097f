//! Lightweight in-process metrics.
//!
//! Decision counters are stored as atomics and rendered in Prometheus text
//! format when the decision service shuts down.

pub mod metrics;
