//! Profile analysis endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;

use super::dto::AnalysisRequest;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::{EntityId, NotificationKind, UserAnalysis};
use crate::error::AppError;

/// GET /api/v1/analyses
pub async fn get_analyses(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<UserAnalysis>>, AppError> {
    let store = state.session_store(&session).await?;
    Ok(Json(store.analyses()))
}

/// POST /api/v1/analyses
///
/// Appends an analysis result to the per-user history.
pub async fn add_analysis(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(request): Json<AnalysisRequest>,
) -> Result<(StatusCode, Json<UserAnalysis>), AppError> {
    if request.platform.trim().is_empty() || request.url.trim().is_empty() {
        return Err(AppError::Validation(
            "platform and url are required".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&request.confidence) {
        return Err(AppError::Validation(
            "confidence must be between 0 and 1".to_string(),
        ));
    }

    let analysis = UserAnalysis {
        id: EntityId::new().0,
        platform: request.platform,
        url: request.url,
        niche: request.niche,
        confidence: request.confidence,
        brand_voice: request.brand_voice,
        audience_insights: request.audience_insights,
        content_themes: request.content_themes,
        created_at: Utc::now(),
    };

    let store = state.session_store(&session).await?;
    store.add_analysis(analysis.clone());
    store.enqueue_notification(NotificationKind::Success, "Profile analysis saved");
    state.sessions.checkpoint(&state.db, &session.sub).await?;

    Ok((StatusCode::CREATED, Json(analysis)))
}
