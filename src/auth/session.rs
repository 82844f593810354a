//! Session management
//!
//! Uses HMAC-signed tokens stored in cookies.
//! No server-side session storage needed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{Plan, UserIdentity};

/// User session claims
///
/// Stored in a signed token. Carries enough display identity to
/// render authenticated pages without a further store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Subject: user id
    pub sub: String,
    /// Display name
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub niche: Option<String>,
    /// When session was created
    pub created_at: DateTime<Utc>,
    /// When session expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if session is expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Issue a session for a verified identity
///
/// The validity window is always finite; `max_age_seconds` comes from
/// configuration. Logout is a client-side token discard, so a leaked
/// token stays valid until this window closes.
pub fn issue_session(identity: &UserIdentity, max_age_seconds: i64) -> Session {
    let now = Utc::now();
    Session {
        sub: identity.id.clone(),
        name: identity.display_name.clone(),
        email: identity.email.clone(),
        plan: identity.plan,
        niche: identity.niche.clone(),
        created_at: now,
        expires_at: now + Duration::seconds(max_age_seconds),
    }
}

/// Create a signed session token
///
/// Token format: base64(payload).base64(hmac_sha256(payload))
///
/// # Arguments
/// * `session` - Session data to encode
/// * `secret` - HMAC secret key
///
/// # Returns
/// Signed token string
pub fn create_session_token(
    session: &Session,
    secret: &str,
) -> Result<String, crate::error::AppError> {
    use base64::{Engine as _, engine::general_purpose};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    // 1. Serialize session to JSON
    let payload =
        serde_json::to_string(session).map_err(|e| crate::error::AppError::Internal(e.into()))?;

    // 2. Base64 encode the payload
    let payload_b64 = general_purpose::URL_SAFE_NO_PAD.encode(payload.as_bytes());

    // 3. Create HMAC-SHA256 signature
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| crate::error::AppError::Encryption(e.to_string()))?;
    mac.update(payload_b64.as_bytes());
    let signature = mac.finalize().into_bytes();
    let signature_b64 = general_purpose::URL_SAFE_NO_PAD.encode(signature);

    // 4. Return "{payload}.{signature}"
    Ok(format!("{}.{}", payload_b64, signature_b64))
}

/// Verify and decode a session token
///
/// Fails closed: a missing part, undecodable payload, bad signature,
/// or expired session all reject the token outright.
///
/// # Arguments
/// * `token` - Token string to verify
/// * `secret` - HMAC secret key
///
/// # Returns
/// Decoded session if valid
pub fn verify_session_token(token: &str, secret: &str) -> Result<Session, crate::error::AppError> {
    use base64::{Engine as _, engine::general_purpose};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    // 1. Split token into payload and signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 2 {
        return Err(crate::error::AppError::Unauthorized);
    }

    let payload_b64 = parts[0];
    let signature_b64 = parts[1];

    // 2. Verify HMAC signature
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| crate::error::AppError::Encryption(e.to_string()))?;
    mac.update(payload_b64.as_bytes());

    let expected_signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| crate::error::AppError::Unauthorized)?;

    mac.verify_slice(&expected_signature)
        .map_err(|_| crate::error::AppError::InvalidSignature)?;

    // 3. Decode and deserialize payload
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| crate::error::AppError::Unauthorized)?;

    let payload_str =
        String::from_utf8(payload_bytes).map_err(|_| crate::error::AppError::Unauthorized)?;

    let session: Session =
        serde_json::from_str(&payload_str).map_err(|_| crate::error::AppError::Unauthorized)?;

    // 4. Check if session is expired
    if session.is_expired() {
        return Err(crate::error::AppError::Unauthorized);
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EntityId;
    use crate::error::AppError;

    const SECRET: &str = "test-secret-key-32-bytes-long!!!";

    fn identity() -> UserIdentity {
        UserIdentity {
            id: EntityId::new().0,
            email: "sarah@example.com".to_string(),
            display_name: "Sarah Johnson".to_string(),
            plan: Plan::Pro,
            niche: Some("Health & Fitness".to_string()),
            platforms: vec![],
            onboarding_complete: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_and_resolve_roundtrip() {
        let identity = identity();
        let session = issue_session(&identity, 3600);
        let token = create_session_token(&session, SECRET).unwrap();

        let resolved = verify_session_token(&token, SECRET).unwrap();
        assert_eq!(resolved.sub, identity.id);
        assert_eq!(resolved.email, identity.email);
        assert_eq!(resolved.name, identity.display_name);
    }

    #[test]
    fn expired_session_fails_closed() {
        let session = issue_session(&identity(), -1);
        let token = create_session_token(&session, SECRET).unwrap();

        let error = verify_session_token(&token, SECRET).unwrap_err();
        assert!(matches!(error, AppError::Unauthorized));
    }

    #[test]
    fn tampered_payload_fails_closed() {
        use base64::{Engine as _, engine::general_purpose};

        let session = issue_session(&identity(), 3600);
        let token = create_session_token(&session, SECRET).unwrap();
        let (payload_b64, signature_b64) = token.split_once('.').unwrap();

        // Swap the subject inside the payload, keep the old signature
        let payload = general_purpose::URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        let forged = String::from_utf8(payload)
            .unwrap()
            .replace(&session.sub, "someone-else");
        let forged_b64 = general_purpose::URL_SAFE_NO_PAD.encode(forged.as_bytes());
        let forged_token = format!("{}.{}", forged_b64, signature_b64);

        let error = verify_session_token(&forged_token, SECRET).unwrap_err();
        assert!(matches!(error, AppError::InvalidSignature));
    }

    #[test]
    fn wrong_secret_fails_closed() {
        let session = issue_session(&identity(), 3600);
        let token = create_session_token(&session, SECRET).unwrap();

        let error =
            verify_session_token(&token, "another-secret-key-32-bytes-long").unwrap_err();
        assert!(matches!(error, AppError::InvalidSignature));
    }

    #[test]
    fn malformed_tokens_fail_closed() {
        for token in ["", "no-dot", "a.b.c", "!!!.???"] {
            assert!(verify_session_token(token, SECRET).is_err());
        }
    }
}
