//! College model
//!
//! The college is the tenant root: every other entity is scoped to one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct College {
    pub id: Uuid,
    pub domain: String,
    pub name: String,
    pub theme_primary: Option<String>,
    pub theme_secondary: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollegeRequest {
    pub domain: String,
    pub name: String,
    pub theme_primary: Option<String>,
    pub theme_secondary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCollegeRequest {
    pub name: Option<String>,
    pub theme_primary: Option<String>,
    pub theme_secondary: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateCollegeRequest {
    /// Validate the payload before it reaches storage
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(CampusError::Validation(
                "College domain is required".to_string(),
            ));
        }
        if self.domain.chars().any(|c| c.is_whitespace()) {
            return Err(CampusError::Validation(
                "College domain must not contain whitespace".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(CampusError::Validation(
                "College name is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_blank_domain() {
        let request = CreateCollegeRequest {
            domain: "  ".to_string(),
            name: "Delhi University".to_string(),
            theme_primary: None,
            theme_secondary: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_domain_with_spaces() {
        let request = CreateCollegeRequest {
            domain: "delhi university".to_string(),
            name: "Delhi University".to_string(),
            theme_primary: None,
            theme_secondary: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_valid_payload() {
        let request = CreateCollegeRequest {
            domain: "du".to_string(),
            name: "Delhi University".to_string(),
            theme_primary: Some("#004c97".to_string()),
            theme_secondary: None,
        };
        assert!(request.validate().is_ok());
    }
}
