//! Credential store and verifier
//!
//! Owns registration and login verification. Passwords go through
//! bcrypt on a blocking thread; the plaintext is never persisted or
//! logged, and the hash never leaves this module.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::data::{Database, EntityId, Plan, UserIdentity};
use crate::error::AppError;

/// Verification failure kinds
///
/// Distinguished internally; the HTTP boundary collapses the first two
/// into one generic invalid-credentials response.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no such user")]
    NoSuchUser,
    #[error("invalid password")]
    InvalidPassword,
    #[error(transparent)]
    App(#[from] AppError),
}

/// Credential service
pub struct CredentialService {
    db: Arc<Database>,
    /// Bcrypt work factor
    cost: u32,
}

impl CredentialService {
    /// Create new credential service
    pub fn new(db: Arc<Database>, cost: u32) -> Self {
        Self { db, cost }
    }

    /// Register a new user
    ///
    /// All three fields must be non-empty after trimming. The email
    /// uniqueness check happens twice: a fast-path read before the
    /// expensive hash, and the authoritative unique index at insert
    /// time (the read-then-write alone would race).
    ///
    /// # Errors
    /// `Validation` for missing fields, `Conflict` for a taken email
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("All fields are required".to_string()));
        }

        // Fast-path guard before expensive hashing.
        if self.db.get_user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(password.to_string(), self.cost).await?;

        let identity = UserIdentity {
            id: EntityId::new().0,
            email: email.to_string(),
            display_name: name.to_string(),
            plan: Plan::Free,
            niche: None,
            platforms: vec![],
            onboarding_complete: false,
            created_at: Utc::now(),
        };

        self.db.insert_user(&identity, &password_hash).await?;

        tracing::info!(user_id = %identity.id, "User registered");

        use crate::metrics::{AUTH_ATTEMPTS_TOTAL, USERS_TOTAL};
        AUTH_ATTEMPTS_TOTAL
            .with_label_values(&["register", "success"])
            .inc();
        USERS_TOTAL.inc();

        Ok(identity)
    }

    /// Verify a login attempt
    ///
    /// Performs zero writes. The email lookup is case-insensitive; the
    /// hash is recomputed and compared even though that costs the same
    /// as registration.
    pub async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, CredentialError> {
        let Some((identity, password_hash)) = self.db.get_user_by_email(email.trim()).await?
        else {
            return Err(CredentialError::NoSuchUser);
        };

        let valid = verify_password(password.to_string(), password_hash).await?;
        if !valid {
            return Err(CredentialError::InvalidPassword);
        }

        Ok(identity)
    }
}

/// Hash a password on a blocking thread
///
/// Bcrypt at a production work factor takes long enough that running
/// it on the async executor would stall the event loop.
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Encryption(e.to_string()))
}

/// Recompute-and-compare on a blocking thread
async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Encryption(e.to_string()))
}
