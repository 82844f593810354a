//! SQLite database operations
//!
//! All database access goes through this module. The users table is the
//! credential store: the only place a password hash is ever read or
//! written. Store snapshots hold the durable subset of each user's
//! session state as versioned JSON.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;

use super::models::{Plan, UserIdentity};
use crate::error::AppError;

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

/// Raw users row; converted before leaving this module so the hash
/// never rides on `UserIdentity`.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    display_name: String,
    password_hash: String,
    plan: String,
    niche: Option<String>,
    platforms: String,
    onboarding_complete: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_parts(self) -> (UserIdentity, String) {
        let platforms: Vec<String> = serde_json::from_str(&self.platforms).unwrap_or_default();
        let identity = UserIdentity {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
            plan: Plan::from_str_or_free(&self.plan),
            niche: self.niche,
            platforms,
            onboarding_complete: self.onboarding_complete,
            created_at: self.created_at,
        };
        (identity, self.password_hash)
    }
}

/// A persisted store snapshot row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRow {
    pub user_id: String,
    pub version: i64,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        let connection_string = format!("sqlite:{}?mode=rwc", path.display());
        let pool = SqlitePool::connect(&connection_string).await?;

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            tracing::error!("Migration failed: {}", e);
            AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
        })?;

        tracing::info!("Database connected and migrated successfully");

        Ok(Self { pool })
    }

    // =========================================================================
    // Users (credential store)
    // =========================================================================

    /// Insert a new user with an already-hashed password
    ///
    /// The unique index on email is authoritative for duplicate
    /// detection; a violation surfaces as `Conflict`.
    pub async fn insert_user(
        &self,
        identity: &UserIdentity,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let platforms = serde_json::to_string(&identity.platforms)
            .map_err(|e| AppError::Internal(e.into()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, display_name, password_hash, plan, niche,
                platforms, onboarding_complete, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&identity.id)
        .bind(&identity.email)
        .bind(&identity.display_name)
        .bind(password_hash)
        .bind(identity.plan.as_str())
        .bind(&identity.niche)
        .bind(&platforms)
        .bind(identity.onboarding_complete)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await;

        use crate::metrics::DB_QUERIES_TOTAL;
        DB_QUERIES_TOTAL
            .with_label_values(&["insert", "users"])
            .inc();

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict("Email already registered".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by email, case-insensitively
    ///
    /// # Returns
    /// The identity and its password hash, or None if no such email
    pub async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(UserIdentity, String)>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        use crate::metrics::DB_QUERIES_TOTAL;
        DB_QUERIES_TOTAL
            .with_label_values(&["select", "users"])
            .inc();

        Ok(row.map(UserRow::into_parts))
    }

    /// Look up a user by id
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<UserIdentity>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.into_parts().0))
    }

    /// Patch profile/onboarding fields on a user row
    ///
    /// Only the provided fields are written.
    ///
    /// # Returns
    /// The updated identity, or None if the user does not exist
    pub async fn update_user_profile(
        &self,
        id: &str,
        display_name: Option<&str>,
        plan: Option<Plan>,
        niche: Option<Option<&str>>,
        platforms: Option<&[String]>,
        onboarding_complete: Option<bool>,
    ) -> Result<Option<UserIdentity>, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };
        let (mut identity, _) = existing.into_parts();

        if let Some(display_name) = display_name {
            identity.display_name = display_name.to_string();
        }
        if let Some(plan) = plan {
            identity.plan = plan;
        }
        if let Some(niche) = niche {
            identity.niche = niche.map(|n| n.to_string());
        }
        if let Some(platforms) = platforms {
            identity.platforms = platforms.to_vec();
        }
        if let Some(onboarding_complete) = onboarding_complete {
            identity.onboarding_complete = onboarding_complete;
        }

        let platforms_json = serde_json::to_string(&identity.platforms)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            UPDATE users
            SET display_name = ?, plan = ?, niche = ?, platforms = ?, onboarding_complete = ?
            WHERE id = ?
            "#,
        )
        .bind(&identity.display_name)
        .bind(identity.plan.as_str())
        .bind(&identity.niche)
        .bind(&platforms_json)
        .bind(identity.onboarding_complete)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        use crate::metrics::DB_QUERIES_TOTAL;
        DB_QUERIES_TOTAL
            .with_label_values(&["update", "users"])
            .inc();

        Ok(Some(identity))
    }

    /// Count registered users (metrics)
    pub async fn count_users(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // Store snapshots
    // =========================================================================

    /// Persist the durable subset of a user's session state
    pub async fn save_store_snapshot(
        &self,
        user_id: &str,
        version: i64,
        payload: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO store_snapshots (user_id, version, payload, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE
            SET version = excluded.version,
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(version)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        use crate::metrics::DB_QUERIES_TOTAL;
        DB_QUERIES_TOTAL
            .with_label_values(&["upsert", "store_snapshots"])
            .inc();

        Ok(())
    }

    /// Load a user's persisted snapshot, if any
    pub async fn load_store_snapshot(&self, user_id: &str) -> Result<Option<SnapshotRow>, AppError> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT user_id, version, payload, updated_at FROM store_snapshots WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
