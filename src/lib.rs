//! Campus Yuva backend
//!
//! Multi-tenant (per-college) backend for English-language learning, peer
//! collaboration, and recruiter-student discovery. This library provides
//! the entity schema, the tenant-scoped data access layer, and the HTTP
//! API surface.

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusError, Result};

// Re-export main components for easy access
pub use api::{build_router, AppState};
pub use database::DatabaseService;
