//! HTTP API layer
//!
//! Stateless axum handlers that translate requests into data-access calls
//! and data-access errors into status codes.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
