//! Workflow engine logic and store trait definitions for statewright.
//!
//! This crate defines the "ports" (store traits) that the infrastructure
//! layer implements, plus the validation and transition rules. It depends
//! only on `statewright-types` -- never on `statewright-infra` or any
//! storage crate.

pub mod repository;
pub mod service;
pub mod workflow;
