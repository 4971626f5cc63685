//! Observability setup for ragdesk.

pub mod tracing_setup;
