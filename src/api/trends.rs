//! Trend and bookmark endpoints

use axum::{
    extract::{Path, State},
    response::Json,
};

use super::dto::{BookmarkResponse, BookmarksResponse, TrendsResponse};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::{TrendFilter, catalog};
use crate::error::AppError;

/// GET /api/v1/trends
///
/// Returns the filtered view. An empty collection is lazily seeded
/// from the catalog first, so a fresh session sees trends immediately.
pub async fn get_trends(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<TrendsResponse>, AppError> {
    let store = state.session_store(&session).await?;

    if store.trends().is_empty() {
        store.load_trends(catalog::sample_trends());
    }

    Ok(Json(TrendsResponse {
        trends: store.filtered_trends(),
        filter: store.filter(),
    }))
}

/// POST /api/v1/trends/refresh
///
/// Reloads the trend collection. Any active filter resets to neutral;
/// stale criteria are never applied to fresh data.
pub async fn refresh_trends(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<TrendsResponse>, AppError> {
    let store = state.session_store(&session).await?;

    store.load_trends(catalog::sample_trends());

    Ok(Json(TrendsResponse {
        trends: store.filtered_trends(),
        filter: store.filter(),
    }))
}

/// POST /api/v1/trends/filter
///
/// Applies filter criteria and returns the recomputed view.
pub async fn filter_trends(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(criteria): Json<TrendFilter>,
) -> Result<Json<TrendsResponse>, AppError> {
    let store = state.session_store(&session).await?;

    store.apply_filter(criteria);

    Ok(Json(TrendsResponse {
        trends: store.filtered_trends(),
        filter: store.filter(),
    }))
}

/// POST /api/v1/trends/:id/bookmark
///
/// Toggles bookmark membership and reports the new state.
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(trend_id): Path<String>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let store = state.session_store(&session).await?;

    let bookmarked = store.toggle_bookmark(&trend_id);
    state.sessions.checkpoint(&state.db, &session.sub).await?;

    Ok(Json(BookmarkResponse {
        trend_id,
        bookmarked,
    }))
}

/// GET /api/v1/bookmarks
pub async fn get_bookmarks(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<BookmarksResponse>, AppError> {
    let store = state.session_store(&session).await?;

    let ids = store.bookmarks();
    let trends = store
        .trends()
        .into_iter()
        .filter(|trend| ids.iter().any(|id| id == &trend.id))
        .collect();

    Ok(Json(BookmarksResponse { ids, trends }))
}
