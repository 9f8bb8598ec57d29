//! User management endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{BorrowerChoice, CreateUser, User},
};

use super::AuthenticatedUser;

/// List users as borrower choices, ordered by last name
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrower directory", body = Vec<BorrowerChoice>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowerChoice>>> {
    claims.require_mark_returned()?;

    let choices = state.services.users.borrower_choices().await?;
    Ok(Json(choices))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid submission"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    claims.require_mark_returned()?;

    let created = state.services.users.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
