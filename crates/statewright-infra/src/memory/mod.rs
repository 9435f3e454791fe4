//! In-memory storage backends.

pub mod store;
