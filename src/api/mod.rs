//! API layer
//!
//! HTTP handlers for:
//! - Workspace API (trends, content, notifications, account)
//! - Metrics (Prometheus)

mod account;
mod analyses;
mod content;
mod dto;
pub mod metrics;
mod notifications;
mod trends;

pub use dto::*;

pub use metrics::metrics_router;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;
use crate::auth::require_auth;

/// Create the workspace API router
///
/// Every route here resolves a valid session before any store or
/// handler logic runs; absence or invalidity is a uniform 401.
pub fn workspace_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Trends
        .route("/v1/trends", get(trends::get_trends))
        .route("/v1/trends/refresh", post(trends::refresh_trends))
        .route("/v1/trends/filter", post(trends::filter_trends))
        .route("/v1/trends/:id/bookmark", post(trends::toggle_bookmark))
        .route("/v1/bookmarks", get(trends::get_bookmarks))
        // Generated content
        .route("/v1/generate", post(content::generate))
        .route("/v1/content", get(content::get_content))
        // Notifications
        .route("/v1/notifications", get(notifications::get_notifications))
        .route(
            "/v1/notifications/:id/dismiss",
            post(notifications::dismiss_notification),
        )
        // Analyses
        .route(
            "/v1/analyses",
            get(analyses::get_analyses).post(analyses::add_analysis),
        )
        // Account
        .route(
            "/v1/account",
            get(account::get_account).patch(account::update_account),
        )
        .layer(middleware::from_fn_with_state(state, require_auth))
}
