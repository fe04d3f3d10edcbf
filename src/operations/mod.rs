//! Operations module
//!
//! Concrete command implementations

pub mod shell;

pub use shell::*;
