//! Notification endpoints

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::Notification;
use crate::error::AppError;

/// GET /api/v1/notifications
///
/// The live queue in display (enqueue) order.
pub async fn get_notifications(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let store = state.session_store(&session).await?;
    Ok(Json(store.notifications()))
}

/// POST /api/v1/notifications/:id/dismiss
///
/// Removes a notification and cancels its expiry timer. Dismissing an
/// id that already expired or was dismissed is a no-op, not an error.
pub async fn dismiss_notification(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = state.session_store(&session).await?;

    store.dismiss_notification(id);

    Ok(Json(serde_json::json!({})))
}
