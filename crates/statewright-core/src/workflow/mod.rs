//! Workflow engine core: definition validation and transition evaluation.
//!
//! - `validator` -- structural and semantic checks on candidate definitions
//! - `transition` -- gate evaluation for firing an action on an instance

pub mod transition;
pub mod validator;
