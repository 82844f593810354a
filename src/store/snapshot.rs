//! Store persistence boundary
//!
//! The durable subset of session state is an explicit allow-list,
//! serialized through this versioned schema. Trends, the active filter,
//! loading flags, and the notification queue are ephemeral and are
//! deliberately absent here; they are rebuilt fresh on each load.

use serde::{Deserialize, Serialize};

use crate::data::{GeneratedContent, UserAnalysis, UserIdentity};
use crate::error::AppError;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: i64 = 1;

/// Versioned, durable subset of a session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: i64,
    pub identity: Option<UserIdentity>,
    pub authenticated: bool,
    pub analyses: Vec<UserAnalysis>,
    /// Bookmarked trend ids
    pub bookmarks: Vec<String>,
    /// Newest-first generated content history
    pub content_history: Vec<GeneratedContent>,
}

impl StoreSnapshot {
    /// Serialize to the JSON payload stored in the snapshots table.
    pub fn encode(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(|e| AppError::Internal(e.into()))
    }

    /// Deserialize a stored payload, rejecting unknown schema versions.
    pub fn decode(payload: &str) -> Result<Self, AppError> {
        let snapshot: Self =
            serde_json::from_str(payload).map_err(|e| AppError::Internal(e.into()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AppError::Internal(anyhow::anyhow!(
                "unsupported store snapshot version {}",
                snapshot.version
            )));
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let snapshot = StoreSnapshot {
            version: SNAPSHOT_VERSION,
            identity: None,
            authenticated: false,
            analyses: vec![],
            bookmarks: vec!["2".to_string(), "5".to_string()],
            content_history: vec![],
        };

        let payload = snapshot.encode().unwrap();
        let decoded = StoreSnapshot::decode(&payload).unwrap();
        assert_eq!(decoded.bookmarks, vec!["2", "5"]);
        assert!(!decoded.authenticated);
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let payload = r#"{"version":99,"identity":null,"authenticated":false,"analyses":[],"bookmarks":[],"content_history":[]}"#;
        assert!(StoreSnapshot::decode(payload).is_err());
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        assert!(StoreSnapshot::decode("not json").is_err());
    }
}
