//! # Authentication
//!
//! Mock authentication behind a trait seam: any non-empty credentials are
//! accepted and a demo user is fabricated. This is a stand-in, not a
//! security layer; the trait exists so a real backend can slot in without
//! touching the rest of the app.
//!
//! The only state persisted across runs is the opaque session token, stored
//! as a plain file at `~/.banter/token`. Messages and input history are
//! deliberately never written to disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// One or more required fields were empty.
    EmptyCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::EmptyCredentials => write!(f, "all fields are required"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Outcome of a successful login or registration.
#[derive(Debug)]
pub struct AuthSession {
    pub user: User,
    /// Opaque token to persist via [`TokenStore`].
    pub token: String,
}

/// The authentication collaborator the UI talks to.
pub trait Authenticator {
    fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    fn register(&self, email: &str, password: &str, name: &str) -> Result<AuthSession, AuthError>;
    /// Rebuild a user from a previously stored token.
    fn restore(&self, token: &str) -> Option<User>;
}

/// Accepts any non-empty credentials and fabricates the user.
#[derive(Debug, Default)]
pub struct MockAuthenticator;

impl MockAuthenticator {
    fn session(user: User) -> AuthSession {
        AuthSession {
            user,
            token: format!("mock-token-{}", uuid::Uuid::new_v4()),
        }
    }
}

impl Authenticator for MockAuthenticator {
    fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(AuthError::EmptyCredentials);
        }
        // Display name is the local part of the address
        let name = email.split('@').next().unwrap_or(email).to_string();
        debug!("Mock login for {email}");
        Ok(Self::session(User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            name,
        }))
    }

    fn register(&self, email: &str, password: &str, name: &str) -> Result<AuthSession, AuthError> {
        let email = email.trim();
        let name = name.trim();
        if email.is_empty() || password.trim().is_empty() || name.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }
        debug!("Mock registration for {email}");
        Ok(Self::session(User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
        }))
    }

    fn restore(&self, token: &str) -> Option<User> {
        if token.trim().is_empty() {
            return None;
        }
        // The mock has no backend to validate against, so any stored token
        // maps to the demo identity.
        Some(User {
            id: "1".to_string(),
            email: "user@example.com".to_string(),
            name: "Demo User".to_string(),
        })
    }
}

/// File-backed store for the opaque session token.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store rooted at `~/.banter/token`. `None` when no home directory can
    /// be determined.
    pub fn default_location() -> Option<Self> {
        dirs::home_dir().map(|home| Self {
            path: home.join(".banter").join("token"),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                (!token.is_empty()).then_some(token)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read token file: {e}");
                None
            }
        }
    }

    pub fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Failed to create token directory: {e}");
            return;
        }
        if let Err(e) = fs::write(&self.path, token) {
            warn!("Failed to write token file: {e}");
        }
    }

    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Token cleared"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove token file: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_any_non_empty_credentials() {
        let auth = MockAuthenticator;
        let session = auth.login("jo@example.com", "hunter2").unwrap();
        assert_eq!(session.user.email, "jo@example.com");
        assert_eq!(session.user.name, "jo");
        assert!(session.token.starts_with("mock-token-"));
    }

    #[test]
    fn test_login_rejects_empty_fields() {
        let auth = MockAuthenticator;
        assert_eq!(
            auth.login("", "pw").unwrap_err(),
            AuthError::EmptyCredentials
        );
        assert_eq!(
            auth.login("a@b.c", "   ").unwrap_err(),
            AuthError::EmptyCredentials
        );
    }

    #[test]
    fn test_register_uses_given_name() {
        let auth = MockAuthenticator;
        let session = auth.register("jo@example.com", "pw", "Jo Doe").unwrap();
        assert_eq!(session.user.name, "Jo Doe");
    }

    #[test]
    fn test_register_rejects_missing_name() {
        let auth = MockAuthenticator;
        assert_eq!(
            auth.register("jo@example.com", "pw", "").unwrap_err(),
            AuthError::EmptyCredentials
        );
    }

    #[test]
    fn test_restore_fabricates_demo_user() {
        let auth = MockAuthenticator;
        let user = auth.restore("mock-token-xyz").unwrap();
        assert_eq!(user.name, "Demo User");
        assert!(auth.restore("").is_none());
    }

    #[test]
    fn test_token_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("banter-auth-{}", uuid::Uuid::new_v4()));
        let store = TokenStore::at(dir.join("token"));
        assert_eq!(store.load(), None);

        store.save("tok-123");
        assert_eq!(store.load(), Some("tok-123".to_string()));

        store.clear();
        assert_eq!(store.load(), None);
        let _ = fs::remove_dir_all(&dir);
    }
}
