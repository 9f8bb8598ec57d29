//! Language endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::language::{Language, LanguagePayload},
};

use super::AuthenticatedUser;

/// List all languages
#[utoipa::path(
    get,
    path = "/catalog/languages",
    tag = "catalog",
    responses(
        (status = 200, description = "All languages", body = Vec<Language>)
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Language>>> {
    let languages = state.services.catalog.list_languages().await?;
    Ok(Json(languages))
}

/// Create a new language
#[utoipa::path(
    post,
    path = "/catalog/languages",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = LanguagePayload,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 400, description = "Invalid submission")
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<LanguagePayload>,
) -> AppResult<(StatusCode, Json<Language>)> {
    claims.require_mark_returned()?;

    let created = state.services.catalog.create_language(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a language
#[utoipa::path(
    put,
    path = "/catalog/languages/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    request_body = LanguagePayload,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found")
    )
)]
pub async fn update_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<LanguagePayload>,
) -> AppResult<Json<Language>> {
    claims.require_mark_returned()?;

    let updated = state
        .services
        .catalog
        .update_language(id, &payload.name)
        .await?;
    Ok(Json(updated))
}

/// Delete a language
#[utoipa::path(
    delete,
    path = "/catalog/languages/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Language ID")
    ),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found")
    )
)]
pub async fn delete_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_mark_returned()?;

    state.services.catalog.delete_language(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
