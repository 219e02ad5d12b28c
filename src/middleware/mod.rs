//! Server middleware
//!
//! Provides request logging and panic recovery.

pub mod logging;
pub mod panic;
