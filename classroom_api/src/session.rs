//! Session credentials read by the request pipeline.

use std::sync::RwLock;

/// Tokens issued at login.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionCredentials {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Source of the bearer token attached to outgoing requests.
///
/// `logout` is called by the client on every 401 response, before the error
/// reaches the caller.
pub trait SessionStore: Send + Sync {
    /// Current access token, if logged in.
    fn access_token(&self) -> Option<String>;

    /// Drops all credentials.
    fn logout(&self);
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySession {
    credentials: RwLock<SessionCredentials>,
}

impl MemorySession {
    /// Creates a logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: SessionCredentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// Replaces the stored tokens.
    pub fn login(&self, access_token: String, refresh_token: Option<String>) {
        let mut creds = self.credentials.write().unwrap_or_else(|e| e.into_inner());
        *creds = SessionCredentials {
            access_token: Some(access_token),
            refresh_token,
        };
    }

    /// Snapshot of the stored tokens.
    pub fn credentials(&self) -> SessionCredentials {
        self.credentials
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl SessionStore for MemorySession {
    fn access_token(&self) -> Option<String> {
        self.credentials
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .access_token
            .clone()
    }

    fn logout(&self) {
        let mut creds = self.credentials.write().unwrap_or_else(|e| e.into_inner());
        if creds.is_authenticated() {
            tracing::info!("Session logged out");
        }
        *creds = SessionCredentials::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_token() {
        let session = MemorySession::new();
        assert_eq!(session.access_token(), None);
        assert!(!session.credentials().is_authenticated());
    }

    #[test]
    fn login_then_logout() {
        let session = MemorySession::new();
        session.login("access".to_string(), Some("refresh".to_string()));
        assert_eq!(session.access_token().as_deref(), Some("access"));
        assert_eq!(
            session.credentials().refresh_token.as_deref(),
            Some("refresh")
        );

        session.logout();
        assert_eq!(session.credentials(), SessionCredentials::default());
    }

    #[test]
    fn logout_is_idempotent() {
        let session = MemorySession::with_credentials(SessionCredentials {
            access_token: Some("a".to_string()),
            refresh_token: None,
        });
        session.logout();
        session.logout();
        assert_eq!(session.access_token(), None);
    }
}
