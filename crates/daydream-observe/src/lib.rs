//! Observability setup for Daydream: structured logging to stderr with an
//! optional OpenTelemetry span bridge.

pub mod tracing_setup;
