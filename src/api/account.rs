//! Account endpoints

use axum::{extract::State, response::Json};

use super::dto::AccountPatch;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::UserIdentity;
use crate::error::AppError;

fn normalize_optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// GET /api/v1/account
///
/// The authoritative identity row for the current session.
pub async fn get_account(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<UserIdentity>, AppError> {
    let identity = state
        .db
        .get_user_by_id(&session.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(identity))
}

/// PATCH /api/v1/account
///
/// Settings and onboarding updates. Writes the users row, then
/// refreshes the session store's identity mirror so every open view
/// sees the change.
pub async fn update_account(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(patch): Json<AccountPatch>,
) -> Result<Json<UserIdentity>, AppError> {
    let display_name = patch.display_name.and_then(normalize_optional_text);
    // An explicit empty niche clears the stored value
    let niche = patch.niche.map(normalize_optional_text);

    let updated = state
        .db
        .update_user_profile(
            &session.sub,
            display_name.as_deref(),
            patch.plan,
            niche.as_ref().map(|n| n.as_deref()),
            patch.platforms.as_deref(),
            patch.onboarding_complete,
        )
        .await?
        .ok_or(AppError::Unauthorized)?;

    let store = state.session_store(&session).await?;
    store.set_identity(Some(updated.clone()));
    state.sessions.checkpoint(&state.db, &session.sub).await?;

    tracing::info!(user_id = %updated.id, "Account updated");

    Ok(Json(updated))
}
