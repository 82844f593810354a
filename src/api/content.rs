//! Content generation endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;

use super::dto::GenerateRequest;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::{EntityId, GeneratedContent, NotificationKind};
use crate::error::AppError;
use crate::generator::GenerationRequest;
use crate::metrics::{GENERATION_DURATION_SECONDS, GENERATIONS_TOTAL};

/// POST /api/v1/generate
///
/// Drives the content generator for a trend or free-form topic. The
/// loading flag is set for the duration of the call; on failure it is
/// cleared, nothing is appended to history, and the user gets one
/// retryable error notification.
pub async fn generate(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GeneratedContent>), AppError> {
    if request.platform.trim().is_empty() || request.content_type.trim().is_empty() {
        return Err(AppError::Validation(
            "platform and content_type are required".to_string(),
        ));
    }

    let store = state.session_store(&session).await?;

    // Resolve the topic before any state changes
    let topic = match (&request.trend_id, &request.topic) {
        (Some(trend_id), _) => store
            .trends()
            .iter()
            .find(|trend| &trend.id == trend_id)
            .map(|trend| trend.title.clone())
            .ok_or(AppError::NotFound)?,
        (None, Some(topic)) if !topic.trim().is_empty() => topic.trim().to_string(),
        _ => {
            return Err(AppError::Validation(
                "either trend_id or topic is required".to_string(),
            ));
        }
    };

    let generation_request = GenerationRequest {
        platform: request.platform.clone(),
        content_type: request.content_type.clone(),
        topic,
    };

    store.set_loading(true);
    let timer = GENERATION_DURATION_SECONDS
        .with_label_values(&[&request.platform])
        .start_timer();
    let outcome = state.generator.generate(&generation_request).await;
    timer.observe_duration();

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) => {
            // Failed attempts leave the history untouched
            store.set_loading(false);
            store.enqueue_notification(
                NotificationKind::Error,
                "Content generation failed. Please try again.",
            );
            GENERATIONS_TOTAL
                .with_label_values(&[&request.platform, "failure"])
                .inc();
            tracing::warn!(user_id = %session.sub, %error, "Content generation failed");
            return Err(AppError::ExternalService(error.to_string()));
        }
    };

    let content = GeneratedContent {
        id: EntityId::new().0,
        trend_id: request.trend_id,
        platform: request.platform.clone(),
        content_type: request.content_type,
        content: outcome.content,
        estimated_reach: Some(outcome.estimated_reach),
        engagement_prediction: Some(outcome.engagement_prediction),
        viral_score: Some(outcome.viral_score),
        created_at: Utc::now(),
    };

    store.record_generated_content(content.clone());
    store.set_loading(false);
    store.enqueue_notification(NotificationKind::Success, "Content generated successfully!");
    state.sessions.checkpoint(&state.db, &session.sub).await?;

    GENERATIONS_TOTAL
        .with_label_values(&[&request.platform, "success"])
        .inc();

    Ok((StatusCode::CREATED, Json(content)))
}

/// GET /api/v1/content
///
/// Generated-content history, newest first.
pub async fn get_content(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<Vec<GeneratedContent>>, AppError> {
    let store = state.session_store(&session).await?;
    Ok(Json(store.content_history()))
}
