//! User model, claims and the staff permission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// User record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// The single staff permission gating every catalog write
    pub can_mark_returned: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

impl User {
    /// Choice label shown in borrower selectors
    pub fn choice_label(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub can_mark_returned: bool,
}

/// Borrower entry for selection lists, ordered by last name
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowerChoice {
    pub id: i32,
    /// "Last, First"
    pub label: String,
}

impl From<&User> for BorrowerChoice {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            label: user.choice_label(),
        }
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub can_mark_returned: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require the staff permission held by librarians
    pub fn require_mark_returned(&self) -> Result<(), AppError> {
        if self.can_mark_returned {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(
                "Staff permission required".to_string(),
            ))
        }
    }
}
