//! Shared domain types for statewright.
//!
//! This crate contains the workflow definition and instance types, the engine
//! error taxonomy, and server configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod workflow;
