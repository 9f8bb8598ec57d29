//! Genre endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::genre::{Genre, GenrePayload},
};

use super::AuthenticatedUser;

/// List all genres
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "catalog",
    responses(
        (status = 200, description = "All genres", body = Vec<Genre>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(genres))
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/catalog/genres",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = GenrePayload,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid submission")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<GenrePayload>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    claims.require_mark_returned()?;

    let created = state.services.catalog.create_genre(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a genre
#[utoipa::path(
    put,
    path = "/catalog/genres/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = GenrePayload,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<GenrePayload>,
) -> AppResult<Json<Genre>> {
    claims.require_mark_returned()?;

    let updated = state.services.catalog.update_genre(id, &payload.name).await?;
    Ok(Json(updated))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/catalog/genres/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_mark_returned()?;

    state.services.catalog.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
