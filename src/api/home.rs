//! Home (aggregate) endpoint

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, services::stats::CatalogCounts};

const SESSION_COOKIE: &str = "locallib_session";

/// Home page aggregate counts
#[derive(Serialize, ToSchema)]
pub struct HomeResponse {
    #[serde(flatten)]
    pub counts: CatalogCounts,
    /// Visits to this view within the current session, before this one
    pub num_visits: i64,
}

/// Catalog-wide counts plus the per-session visit counter
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Aggregate catalog counts", body = HomeResponse)
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<HomeResponse>)> {
    let counts = state
        .services
        .stats
        .catalog_counts(
            &state.config.catalog.featured_title_contains,
            &state.config.catalog.featured_genre_contains,
        )
        .await?;

    // Visit counting is session-scoped: the session id rides in a cookie
    // and the counter lives server-side until the session expires.
    let session_id = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => Uuid::new_v4().to_string(),
    };
    let num_visits = state.services.sessions.record_visit(&session_id).await?;

    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true),
    );

    Ok((jar, Json(HomeResponse { counts, num_visits })))
}
