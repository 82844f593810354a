//! Trendlab - backend for a trend-driven content workspace
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - Credential auth endpoints (register/login/logout)        │
//! │  - Workspace endpoints (trends, content, notifications)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application State Store                     │
//! │  - One per authenticated session                            │
//! │  - Derived filtered view, bookmarks, history,               │
//! │    auto-expiring notifications                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - SQLite (sqlx): users, store snapshots                    │
//! │  - Trend catalog (seed data)                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers for the workspace API
//! - `auth`: Credential store, session tokens, middleware
//! - `store`: Per-session application state store
//! - `generator`: Content generation boundary
//! - `data`: Database and trend catalog
//! - `config`: Configuration management
//! - `error`: Error types

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use auth::Session;
use error::AppError;
use generator::{ContentGenerator, SimulatedGenerator};
use store::{SessionStores, StateStore};

/// Application state shared across all handlers
///
/// This struct is cloned for each request and contains
/// shared resources like the database pool, the session-store
/// registry, and the content generator.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Database connection pool
    pub db: Arc<data::Database>,

    /// Credential store and verifier
    pub credentials: Arc<auth::CredentialService>,

    /// Per-session state store registry
    pub sessions: Arc<SessionStores>,

    /// Content generation capability
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to SQLite database
    /// 2. Build the credential service and session-store registry
    /// 3. Wire up the simulated content generator
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: config::AppConfig) -> Result<Self, AppError> {
        let generator = Arc::new(SimulatedGenerator::new(Duration::from_millis(
            config.generator.latency_ms,
        )));
        Self::with_generator(config, generator).await
    }

    /// Initialize with a custom generator implementation.
    ///
    /// Used by tests and by deployments that plug in a real backend.
    pub async fn with_generator(
        config: config::AppConfig,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<Self, AppError> {
        tracing::info!("Initializing application state...");

        // 1. Connect to SQLite database
        let db = Arc::new(data::Database::connect(&config.database.path).await?);
        tracing::info!("Database connected");

        // 2. Credential service and session-store registry
        let credentials = Arc::new(auth::CredentialService::new(
            db.clone(),
            config.auth.bcrypt_cost,
        ));
        let sessions = Arc::new(SessionStores::new(
            Duration::from_secs(config.auth.session_max_age as u64),
            Duration::from_millis(config.store.notification_ttl_ms),
        ));
        tracing::info!("Session store registry initialized");

        // 3. Seed the users gauge
        use crate::metrics::USERS_TOTAL;
        USERS_TOTAL.set(db.count_users().await?);

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config: Arc::new(config),
            db,
            credentials,
            sessions,
            generator,
        })
    }

    /// Resolve the live state store for a session's user.
    ///
    /// The users row is re-read so a deleted account fails closed
    /// even while its token is still within its validity window.
    pub async fn session_store(&self, session: &Session) -> Result<Arc<StateStore>, AppError> {
        let identity = self
            .db
            .get_user_by_id(&session.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        self.sessions.get_or_restore(&self.db, &identity).await
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::{compression::CompressionLayer, trace::TraceLayer};

    let cors_layer = build_cors_layer(&state.config.server);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(auth::auth_router())
        .nest("/api", api::workspace_api_router(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
        .merge(api::metrics_router())
}

fn build_cors_layer(server: &config::ServerConfig) -> tower_http::cors::CorsLayer {
    use axum::http::HeaderValue;
    use tower_http::cors::{Any, CorsLayer};

    if !server.protocol.eq_ignore_ascii_case("https") {
        return CorsLayer::permissive();
    }

    let allowed_origin = server.base_url();
    match HeaderValue::from_str(&allowed_origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin([origin])
            .allow_methods(Any)
            .allow_headers(Any),
        Err(error) => {
            tracing::error!(
                %error,
                origin = %allowed_origin,
                "Failed to parse CORS origin from server base URL; denying cross-origin requests"
            );
            CorsLayer::new().allow_methods(Any).allow_headers(Any)
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}
