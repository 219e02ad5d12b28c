//! Authentication system
//!
//! Handles account registration and device-locked login.

pub mod operations;
pub mod requests;
pub mod results;
pub mod validator;

pub use operations::{process_login, process_register};
pub use requests::{LoginRequest, RegisterRequest};
pub use results::UserSummary;
