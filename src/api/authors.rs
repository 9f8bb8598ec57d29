//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    forms::author::AuthorPayload,
    models::{author::Author, PageQuery},
};

use super::{AuthenticatedUser, PaginatedResponse};

const AUTHORS_PER_PAGE: i64 = 10;

/// List authors with pagination
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of authors", body = PaginatedResponse<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<Author>>> {
    let (page, per_page) = query.resolve(AUTHORS_PER_PAGE);
    let (items, total) = state.services.catalog.list_authors(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/catalog/authors/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/catalog/authors",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = AuthorPayload,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid submission"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<AuthorPayload>,
) -> AppResult<(StatusCode, Json<Author>)> {
    claims.require_mark_returned()?;

    let created = state.services.catalog.create_author(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/catalog/authors/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = AuthorPayload,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid submission"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorPayload>,
) -> AppResult<Json<Author>> {
    claims.require_mark_returned()?;

    let updated = state.services.catalog.update_author(id, payload).await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/catalog/authors/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_mark_returned()?;

    state.services.catalog.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
