//! Server core functionality
//!
//! This module contains the main server implementation and its shutdown
//! signal handling.

pub mod core;
pub mod shutdown;

pub use core::Server;
pub use shutdown::shutdown_signal;
