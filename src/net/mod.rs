//! Local hostname resolution
//!
//! The dispatcher needs a reachable endpoint for the registering process.
//! Resolution sits behind a trait so deployments with a known address (and
//! tests) can bypass the OS resolver.

mod resolver;

pub use resolver::*;
