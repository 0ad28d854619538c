//! HTTP error mapping
//!
//! Expected outcomes (validation, not-found, conflict, capacity,
//! authorization) surface with their specific message; everything else is
//! logged in full server-side and returned as an opaque internal error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::utils::errors::CampusError;

impl IntoResponse for CampusError {
    fn into_response(self) -> Response {
        let status = match self {
            CampusError::Validation(_) => StatusCode::BAD_REQUEST,
            CampusError::Unauthorized(_) => StatusCode::FORBIDDEN,
            CampusError::NotFound { .. } => StatusCode::NOT_FOUND,
            CampusError::Conflict(_)
            | CampusError::CapacityExceeded { .. }
            | CampusError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.is_expected() {
            warn!(error = %self, status = %status, "Request failed");
            let body = Json(serde_json::json!({ "error": self.to_string() }));
            (status, body).into_response()
        } else {
            error!(error = %self, "Internal error while handling request");
            let body = Json(serde_json::json!({ "error": "internal server error" }));
            (status, body).into_response()
        }
    }
}
