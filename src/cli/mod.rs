//! Command-line host module
//!
//! Runner settings taken from the environment

pub mod settings;

pub use settings::*;
