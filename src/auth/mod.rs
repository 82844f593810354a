//! Credential authentication
//!
//! Handles:
//! - Registration and login verification
//! - Session token issuance and resolution
//! - Authentication middleware

mod credentials;
mod middleware;
mod routes;
pub mod session;

pub use credentials::{CredentialError, CredentialService};
pub use middleware::{CurrentUser, require_auth};
pub use routes::auth_router;
pub use session::{Session, create_session_token, issue_session, verify_session_token};
