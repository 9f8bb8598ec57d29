//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    forms::book::BookPayload,
    models::{
        book::{BookDetails, BookShort},
        PageQuery,
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

const BOOKS_PER_PAGE: i64 = 10;

/// List books with pagination
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books", body = PaginatedResponse<BookShort>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let (page, per_page) = query.resolve(BOOKS_PER_PAGE);
    let (items, total) = state.services.catalog.list_books(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/catalog/books/{id}",
    tag = "catalog",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/catalog/books",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookDetails),
        (status = 400, description = "Invalid submission"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<BookDetails>)> {
    claims.require_mark_returned()?;

    let created = state.services.catalog.create_book(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/catalog/books/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = BookDetails),
        (status = 400, description = "Invalid submission"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<BookDetails>> {
    claims.require_mark_returned()?;

    let updated = state.services.catalog.update_book(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/catalog/books/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_mark_returned()?;

    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
