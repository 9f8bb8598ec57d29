//! Language model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book language (one per book)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Create/update language request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LanguagePayload {
    pub name: String,
}
