//! Loan listings and the renewal workflow endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::renew::RenewPayload,
    models::{instance::InstanceDetails, PageQuery},
    services::loans::RenewalForm,
};

use super::{AuthenticatedUser, PaginatedResponse};

const LOANS_PER_PAGE: i64 = 10;

/// Renewal response with the updated copy
#[derive(Serialize, ToSchema)]
pub struct RenewResponse {
    /// Status message
    pub message: String,
    /// The copy after renewal
    pub instance: InstanceDetails,
}

/// Copies on loan to the current user
#[utoipa::path(
    get,
    path = "/loans/mine",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Own loans, soonest due first", body = PaginatedResponse<InstanceDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<InstanceDetails>>> {
    let (page, per_page) = query.resolve(LOANS_PER_PAGE);
    let (items, total) = state
        .services
        .loans
        .user_loans(claims.user_id, page, per_page)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Every copy currently on loan
#[utoipa::path(
    get,
    path = "/loans/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All loans, soonest due first", body = PaginatedResponse<InstanceDetails>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<InstanceDetails>>> {
    claims.require_mark_returned()?;

    let (page, per_page) = query.resolve(LOANS_PER_PAGE);
    let (items, total) = state.services.loans.all_borrowed(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Get the unbound renewal form for a copy
#[utoipa::path(
    get,
    path = "/catalog/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy token")
    ),
    responses(
        (status = 200, description = "Renewal form data", body = RenewalForm),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renewal_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalForm>> {
    claims.require_mark_returned()?;

    let today = Utc::now().date_naive();
    let form = state.services.loans.renewal_form(id, today).await?;
    Ok(Json(form))
}

/// Renew a copy: set its due date and borrower
#[utoipa::path(
    post,
    path = "/catalog/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy token")
    ),
    request_body = RenewPayload,
    responses(
        (status = 200, description = "Copy renewed", body = RenewResponse),
        (status = 400, description = "Invalid submission"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Staff permission required"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RenewPayload>,
) -> AppResult<Json<RenewResponse>> {
    claims.require_mark_returned()?;

    let today = Utc::now().date_naive();
    let instance = state.services.loans.renew(id, payload, today).await?;

    Ok(Json(RenewResponse {
        message: format!("Copy renewed until {}", instance.due_back.unwrap_or(today)),
        instance,
    }))
}
