//! Error handling module
//!
//! Defines the runner error taxonomy and its exit codes

pub mod types;

pub use types::*;
