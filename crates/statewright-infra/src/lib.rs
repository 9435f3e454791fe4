//! Infrastructure layer for statewright.
//!
//! Contains implementations of the store traits defined in `statewright-core`
//! (concurrent in-memory maps) and configuration file loading.

pub mod config;
pub mod memory;
