//! Shared application state injected into every handler

use crate::database::{DatabasePool, DatabaseService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub pool: DatabasePool,
}

impl AppState {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            db: DatabaseService::new(pool.clone()),
            pool,
        }
    }
}
