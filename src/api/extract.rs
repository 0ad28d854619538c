//! Request extractors shared across handlers

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use uuid::Uuid;

use crate::utils::errors::CampusError;

/// Mandatory tenant context. Deserialization fails with a client error when
/// `college_id` is absent, which keeps "no tenant specified" distinguishable
/// from "tenant has no data".
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TenantQuery {
    pub college_id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Acting identity for privileged routes, set by the external identity
/// layer as the `x-actor-email` header.
#[derive(Debug, Clone)]
pub struct ActorEmail(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ActorEmail
where
    S: Send + Sync,
{
    type Rejection = CampusError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-actor-email")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| ActorEmail(value.to_string()))
            .ok_or_else(|| CampusError::Unauthorized("Missing x-actor-email header".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let page = Pagination::default();
        assert_eq!(page.limit(), 50);
        assert_eq!(page.offset(), 0);

        let page = Pagination {
            limit: Some(100_000),
            offset: Some(-5),
        };
        assert_eq!(page.limit(), 200);
        assert_eq!(page.offset(), 0);
    }
}
