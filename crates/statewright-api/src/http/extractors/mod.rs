//! Custom axum extractors.

pub mod json;
