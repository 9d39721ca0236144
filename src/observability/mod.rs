//! Observability subsystem.
//!
//! Structured logs go through `tracing` (initialized in `main`); metrics
//! go through the `metrics` facade, exported via Prometheus when
//! `METRICS_ADDR` is set. Recording is unconditional; without an
//! installed recorder the macros are no-ops.

pub mod metrics;
