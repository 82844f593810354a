//! Per-session store registry
//!
//! Maps user ids to live `StateStore` instances. Stores are
//! materialized on first authenticated access, restored from their
//! persisted snapshot, and evicted after the session max age.
//! Uses Moka for high-performance concurrent caching.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use super::StateStore;
use super::snapshot::{SNAPSHOT_VERSION, StoreSnapshot};
use crate::data::{Database, UserIdentity};
use crate::error::AppError;

/// Registry of live session stores
pub struct SessionStores {
    /// User id -> live store
    stores: Cache<String, Arc<StateStore>>,
    /// Expiry delay handed to each new store's notification queue
    notification_ttl: Duration,
}

impl SessionStores {
    /// Create a new registry.
    ///
    /// # Arguments
    /// * `max_age` - TTL for idle session stores (matches session max age)
    /// * `notification_ttl` - notification auto-expiry delay for new stores
    pub fn new(max_age: Duration, notification_ttl: Duration) -> Self {
        let stores = Cache::builder().time_to_live(max_age).build();

        Self {
            stores,
            notification_ttl,
        }
    }

    /// Get the live store for a user, materializing it if needed.
    ///
    /// A fresh store is restored from the user's persisted snapshot
    /// (unreadable snapshots are discarded with a warning), then its
    /// identity mirror is refreshed from the authoritative users row.
    pub async fn get_or_restore(
        &self,
        db: &Arc<Database>,
        identity: &UserIdentity,
    ) -> Result<Arc<StateStore>, AppError> {
        let db = db.clone();
        let identity = identity.clone();
        let user_id = identity.id.clone();
        let notification_ttl = self.notification_ttl;

        let store = self
            .stores
            .try_get_with(user_id, async move {
                let store = StateStore::new(notification_ttl);

                if let Some(row) = db.load_store_snapshot(&identity.id).await? {
                    match StoreSnapshot::decode(&row.payload) {
                        Ok(snapshot) => store.restore(snapshot),
                        Err(error) => {
                            tracing::warn!(
                                user_id = %identity.id,
                                %error,
                                "Discarding unreadable store snapshot"
                            );
                        }
                    }
                }

                // The users row, not the snapshot, is authoritative for identity
                store.set_identity(Some(identity));

                Ok::<_, AppError>(store)
            })
            .await
            .map_err(|e: Arc<AppError>| {
                AppError::Internal(anyhow::anyhow!("failed to materialize session store: {e}"))
            })?;

        use crate::metrics::ACTIVE_SESSION_STORES;
        ACTIVE_SESSION_STORES.set(self.stores.entry_count() as i64);

        Ok(store)
    }

    /// Persist the durable subset of a user's store, if one is live.
    pub async fn checkpoint(&self, db: &Arc<Database>, user_id: &str) -> Result<(), AppError> {
        let Some(store) = self.stores.get(user_id).await else {
            return Ok(());
        };

        let payload = store.snapshot().encode()?;
        db.save_store_snapshot(user_id, SNAPSHOT_VERSION, &payload)
            .await?;

        tracing::debug!(user_id = %user_id, "Session store checkpointed");
        Ok(())
    }

    /// Checkpoint and drop a user's store (logout path).
    pub async fn evict(&self, db: &Arc<Database>, user_id: &str) -> Result<(), AppError> {
        self.checkpoint(db, user_id).await?;
        self.stores.invalidate(user_id).await;

        use crate::metrics::ACTIVE_SESSION_STORES;
        ACTIVE_SESSION_STORES.set(self.stores.entry_count() as i64);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EntityId, Plan};
    use chrono::Utc;
    use tempfile::TempDir;

    async fn create_test_db() -> (Arc<Database>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("registry.db");
        let db = Database::connect(&db_path).await.unwrap();
        (Arc::new(db), temp_dir)
    }

    fn registered_identity() -> UserIdentity {
        UserIdentity {
            id: EntityId::new().0,
            email: "sarah@example.com".to_string(),
            display_name: "Sarah Johnson".to_string(),
            plan: Plan::Pro,
            niche: None,
            platforms: vec![],
            onboarding_complete: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn same_user_gets_the_same_store() {
        let (db, _temp_dir) = create_test_db().await;
        let registry = SessionStores::new(Duration::from_secs(600), Duration::from_millis(5000));
        let identity = registered_identity();
        db.insert_user(&identity, "hash").await.unwrap();

        let first = registry.get_or_restore(&db, &identity).await.unwrap();
        let second = registry.get_or_restore(&db, &identity).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn evicted_store_restores_durable_state_from_snapshot() {
        let (db, _temp_dir) = create_test_db().await;
        let registry = SessionStores::new(Duration::from_secs(600), Duration::from_millis(5000));
        let identity = registered_identity();
        db.insert_user(&identity, "hash").await.unwrap();

        let store = registry.get_or_restore(&db, &identity).await.unwrap();
        store.toggle_bookmark("4");
        store.load_trends(crate::data::catalog::sample_trends());

        registry.evict(&db, &identity.id).await.unwrap();

        let restored = registry.get_or_restore(&db, &identity).await.unwrap();
        assert!(!Arc::ptr_eq(&store, &restored));
        assert!(restored.is_bookmarked("4"));
        // Trends are ephemeral and come back empty
        assert!(restored.trends().is_empty());
    }

    #[tokio::test]
    async fn checkpoint_without_live_store_is_a_noop() {
        let (db, _temp_dir) = create_test_db().await;
        let registry = SessionStores::new(Duration::from_secs(600), Duration::from_millis(5000));

        registry.checkpoint(&db, "absent-user").await.unwrap();
    }
}
