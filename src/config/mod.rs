//! Configuration module for the Dispatch client
//!
//! Supports programmatic construction and loading from environment variables.

mod settings;

pub use settings::*;
