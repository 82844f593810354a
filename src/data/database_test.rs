//! Database tests

use super::*;
use crate::error::AppError;
use chrono::Utc;
use tempfile::TempDir;

/// Helper to create a test database
async fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::connect(&db_path).await.unwrap();
    (db, temp_dir)
}

fn test_identity(email: &str) -> UserIdentity {
    UserIdentity {
        id: EntityId::new().0,
        email: email.to_string(),
        display_name: "Test User".to_string(),
        plan: Plan::Free,
        niche: None,
        platforms: vec![],
        onboarding_complete: false,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_database_connection() {
    let (_db, _temp_dir) = create_test_db().await;
    // Connection successful if we get here without panicking
}

#[tokio::test]
async fn test_insert_and_get_user() {
    let (db, _temp_dir) = create_test_db().await;

    let identity = test_identity("sarah@example.com");
    db.insert_user(&identity, "hashed-password").await.unwrap();

    let (retrieved, hash) = db
        .get_user_by_email("sarah@example.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(retrieved.id, identity.id);
    assert_eq!(retrieved.email, "sarah@example.com");
    assert_eq!(hash, "hashed-password");

    let by_id = db.get_user_by_id(&identity.id).await.unwrap();
    assert_eq!(by_id.unwrap().email, "sarah@example.com");
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let (db, _temp_dir) = create_test_db().await;

    let identity = test_identity("Sarah@Example.com");
    db.insert_user(&identity, "hash").await.unwrap();

    let found = db.get_user_by_email("sarah@example.com").await.unwrap();
    let (found, _) = found.expect("lookup should be case-insensitive");
    // Stored casing is preserved
    assert_eq!(found.email, "Sarah@Example.com");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let (db, _temp_dir) = create_test_db().await;

    db.insert_user(&test_identity("sarah@example.com"), "hash-1")
        .await
        .unwrap();

    let error = db
        .insert_user(&test_identity("SARAH@example.com"), "hash-2")
        .await
        .unwrap_err();
    assert!(matches!(error, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_user_profile_patches_only_given_fields() {
    let (db, _temp_dir) = create_test_db().await;

    let identity = test_identity("alex@example.com");
    db.insert_user(&identity, "hash").await.unwrap();

    let platforms = vec!["Instagram".to_string(), "TikTok".to_string()];
    let updated = db
        .update_user_profile(
            &identity.id,
            None,
            Some(Plan::Pro),
            Some(Some("Technology & AI")),
            Some(&platforms),
            Some(true),
        )
        .await
        .unwrap()
        .expect("user should exist");

    assert_eq!(updated.display_name, "Test User");
    assert_eq!(updated.plan, Plan::Pro);
    assert_eq!(updated.niche.as_deref(), Some("Technology & AI"));
    assert_eq!(updated.platforms, platforms);
    assert!(updated.onboarding_complete);

    // Patch persisted
    let reloaded = db.get_user_by_id(&identity.id).await.unwrap().unwrap();
    assert_eq!(reloaded.plan, Plan::Pro);
    assert!(reloaded.onboarding_complete);

    let missing = db
        .update_user_profile("no-such-id", Some("x"), None, None, None, None)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_snapshot_roundtrip_and_overwrite() {
    let (db, _temp_dir) = create_test_db().await;

    let identity = test_identity("sarah@example.com");
    db.insert_user(&identity, "hash").await.unwrap();

    assert!(
        db.load_store_snapshot(&identity.id)
            .await
            .unwrap()
            .is_none()
    );

    db.save_store_snapshot(&identity.id, 1, r#"{"bookmarks":["1"]}"#)
        .await
        .unwrap();
    let row = db
        .load_store_snapshot(&identity.id)
        .await
        .unwrap()
        .expect("snapshot saved");
    assert_eq!(row.version, 1);
    assert!(row.payload.contains("bookmarks"));

    // Second save replaces the first
    db.save_store_snapshot(&identity.id, 1, r#"{"bookmarks":[]}"#)
        .await
        .unwrap();
    let row = db.load_store_snapshot(&identity.id).await.unwrap().unwrap();
    assert!(!row.payload.contains("\"1\""));
}

#[tokio::test]
async fn test_count_users() {
    let (db, _temp_dir) = create_test_db().await;

    assert_eq!(db.count_users().await.unwrap(), 0);
    db.insert_user(&test_identity("a@example.com"), "h")
        .await
        .unwrap();
    db.insert_user(&test_identity("b@example.com"), "h")
        .await
        .unwrap();
    assert_eq!(db.count_users().await.unwrap(), 2);
}
