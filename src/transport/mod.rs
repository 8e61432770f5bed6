//! HTTP transport layer
//!
//! The client issues every dispatcher call through the [`HttpTransport`]
//! trait. `HttpClientTransport` is the reqwest-backed default;
//! `MockTransport` is a recording in-memory implementation for tests.

mod http;
mod mock;
mod traits;

pub use http::*;
pub use mock::*;
pub use traits::*;
