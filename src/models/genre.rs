//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book genre (many-to-many with books)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Create/update genre request
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenrePayload {
    pub name: String,
}
