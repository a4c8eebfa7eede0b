//! Unit tests for blobstate-core.
//!
//! These tests focus on pure functions and data structures without I/O.

pub mod conditions;
pub mod key_mapping;
pub mod payloads;
