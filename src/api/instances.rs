//! Book copy endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::instance::{InstanceCreatePayload, InstanceUpdatePayload},
    models::{
        instance::{BookInstance, InstanceDetails},
        PageQuery,
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

const INSTANCES_PER_PAGE: i64 = 50;

/// List every copy in the catalog
#[utoipa::path(
    get,
    path = "/catalog/instances",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Page of copies", body = PaginatedResponse<InstanceDetails>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required")
    )
)]
pub async fn list_instances(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<InstanceDetails>>> {
    claims.require_mark_returned()?;

    let (page, per_page) = query.resolve(INSTANCES_PER_PAGE);
    let (items, total) = state.services.catalog.list_copies(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Get a copy by its token
#[utoipa::path(
    get,
    path = "/catalog/instances/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy token")
    ),
    responses(
        (status = 200, description = "Copy details", body = InstanceDetails),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InstanceDetails>> {
    claims.require_mark_returned()?;

    let instance = state.services.catalog.get_copy(id).await?;
    Ok(Json(instance))
}

/// Create a new copy
#[utoipa::path(
    post,
    path = "/catalog/instances",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = InstanceCreatePayload,
    responses(
        (status = 201, description = "Copy created", body = BookInstance),
        (status = 400, description = "Invalid submission"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required")
    )
)]
pub async fn create_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<InstanceCreatePayload>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    claims.require_mark_returned()?;

    let created = state.services.catalog.create_copy(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a copy
#[utoipa::path(
    put,
    path = "/catalog/instances/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy token")
    ),
    request_body = InstanceUpdatePayload,
    responses(
        (status = 200, description = "Copy updated", body = BookInstance),
        (status = 400, description = "Invalid submission"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<InstanceUpdatePayload>,
) -> AppResult<Json<BookInstance>> {
    claims.require_mark_returned()?;

    let updated = state.services.catalog.update_copy(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/catalog/instances/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy token")
    ),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_mark_returned()?;

    state.services.catalog.delete_copy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
