//! Registration lifecycle module
//!
//! Implements the register / heartbeat / deregister state machine against
//! the dispatcher.

mod client;
mod handle;
mod heartbeat;
mod termination;

pub use client::*;
pub use handle::*;
pub use termination::*;
