//! Logging and trace export setup for statewright binaries.

pub mod tracing_setup;
