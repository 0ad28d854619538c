//! Utility modules
//!
//! Shared error types and logging helpers used across the application.

pub mod errors;
pub mod logging;

pub use errors::{CampusError, Result};
