//! Credential authentication flow
//!
//! Registration, login, and logout. Login failures are reported with
//! one generic message regardless of whether the email or the password
//! was wrong.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};

use super::credentials::CredentialError;
use super::middleware::CurrentUser;
use super::session::{create_session_token, issue_session};
use crate::AppState;
use crate::error::AppError;
use crate::metrics::AUTH_ATTEMPTS_TOTAL;

/// Create authentication router
///
/// Routes:
/// - POST /auth/register - Create an account
/// - POST /auth/login - Verify credentials, issue session
/// - POST /auth/logout - Checkpoint the session store, clear cookie
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

// =============================================================================
// Registration
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    message: &'static str,
    user_id: String,
}

/// POST /auth/register
///
/// # Responses
/// - 201 with the new user id
/// - 400 when a field is missing
/// - 409 when the email is already registered
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let identity = state
        .credentials
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created successfully",
            user_id: identity.id,
        }),
    ))
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Minimal identity echoed back on login
#[derive(Debug, Serialize)]
struct UserSummary {
    id: String,
    name: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    user: UserSummary,
}

/// POST /auth/login
///
/// Verifies credentials, issues a signed session token (returned in
/// the body and set as a cookie), and materializes the caller's
/// session store from its persisted snapshot.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let identity = match state
        .credentials
        .verify(&request.email, &request.password)
        .await
    {
        Ok(identity) => identity,
        Err(CredentialError::NoSuchUser) | Err(CredentialError::InvalidPassword) => {
            AUTH_ATTEMPTS_TOTAL
                .with_label_values(&["login", "failure"])
                .inc();
            return Err(AppError::InvalidCredentials);
        }
        Err(CredentialError::App(error)) => return Err(error),
    };

    AUTH_ATTEMPTS_TOTAL
        .with_label_values(&["login", "success"])
        .inc();

    let session = issue_session(&identity, state.config.auth.session_max_age);
    let token = create_session_token(&session, &state.config.auth.session_secret)?;

    // Materialize the session store so the first page load sees
    // restored bookmarks and history.
    state.sessions.get_or_restore(&state.db, &identity).await?;

    tracing::info!(user_id = %identity.id, "User logged in");

    let response = LoginResponse {
        token: token.clone(),
        user: UserSummary {
            id: identity.id,
            name: identity.display_name,
            email: identity.email,
        },
    };

    Ok((jar.add(session_cookie(token, &state)), Json(response)))
}

// =============================================================================
// Logout
// =============================================================================

/// POST /auth/logout
///
/// Sessions are stateless, so this cannot invalidate the token; it
/// checkpoints and drops the session store and clears the cookie.
async fn logout(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    state.sessions.evict(&state.db, &session.sub).await?;

    tracing::info!(user_id = %session.sub, "User logged out");

    let removal = Cookie::build(("session", "")).path("/").build();
    Ok((jar.remove(removal), Json(serde_json::json!({}))))
}

// =============================================================================
// Helpers
// =============================================================================

/// Expiry lives inside the signed token, so the cookie itself is a
/// plain session cookie.
fn session_cookie(token: String, state: &AppState) -> Cookie<'static> {
    Cookie::build(("session", token))
        .path("/")
        .http_only(true)
        .secure(state.config.should_use_secure_cookies())
        .same_site(SameSite::Lax)
        .build()
}
