//! Session authentication gate.
//!
//! The gate owns the identity directory and the session table (through an
//! injected [`Store`]) and exposes the four operations the web layer builds
//! on: [`Gate::register`], [`Gate::authenticate`], [`Gate::check_access`] and
//! [`Gate::invalidate`].
//!
//! Credentials are kept and compared in plaintext. Only session tokens are
//! hashed before they are stored.

mod credentials;
mod error;
mod store;
mod token;

pub use credentials::Credentials;
pub use error::Rejection;
pub use store::{MemoryStore, SessionRecord, Store};
pub use token::SessionToken;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const DEFAULT_SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;
pub const MAX_SESSION_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_ttl_seconds: u64,
    session_cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_cookie_secure: false,
        }
    }

    /// Values above [`MAX_SESSION_TTL_SECONDS`] are clamped.
    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds.min(MAX_SESSION_TTL_SECONDS);
        self
    }

    #[must_use]
    pub fn with_session_cookie_secure(mut self, secure: bool) -> Self {
        self.session_cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure
    }
}

/// A registered user as seen by guarded handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// A freshly issued session.
#[derive(Debug)]
pub struct Session {
    pub token: SessionToken,
    pub username: String,
    pub expires_at: Instant,
}

pub struct Gate {
    config: AuthConfig,
    store: Arc<dyn Store>,
}

impl Gate {
    #[must_use]
    pub fn new(config: AuthConfig, store: Arc<dyn Store>) -> Self {
        Self { config, store }
    }

    /// Gate backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory(config: AuthConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Add a new identity to the directory.
    ///
    /// # Errors
    /// `MissingField` if either value is empty, `DuplicateIdentity` if the
    /// username is already registered.
    #[instrument(skip_all, fields(username = %username))]
    pub fn register(&self, username: &str, credential: &str) -> Result<(), Rejection> {
        let credentials = Credentials::new(username, credential)?;
        self.store.insert_identity(credentials)?;
        info!("identity registered");
        Ok(())
    }

    /// Check a username/credential pair and open a session for it.
    ///
    /// # Errors
    /// `InvalidCredentials` for unknown users, wrong credentials and empty
    /// input alike.
    #[instrument(skip_all, fields(username = %username))]
    pub fn authenticate(&self, username: &str, credential: &str) -> Result<Session, Rejection> {
        let credentials =
            Credentials::new(username, credential).map_err(|_| Rejection::InvalidCredentials)?;

        if !self.store.verify_identity(&credentials) {
            debug!("authentication failed");
            return Err(Rejection::InvalidCredentials);
        }

        let token = SessionToken::generate();
        let now = Instant::now();
        let Some(expires_at) =
            now.checked_add(Duration::from_secs(self.config.session_ttl_seconds))
        else {
            warn!(
                ttl_seconds = self.config.session_ttl_seconds,
                "session expiry out of range"
            );
            return Err(Rejection::InvalidCredentials);
        };
        self.store.insert_session(
            token.digest(),
            SessionRecord {
                username: credentials.username().to_string(),
                expires_at,
            },
        );
        info!("session opened");

        Ok(Session {
            token,
            username: credentials.username().to_string(),
            expires_at,
        })
    }

    /// Resolve a session to its identity.
    ///
    /// Expired sessions, and sessions whose identity is gone, are removed on
    /// the way out.
    ///
    /// # Errors
    /// `Denied` when the session is unknown, expired or dangling.
    pub fn check_access(&self, token: &SessionToken) -> Result<Identity, Rejection> {
        let token_hash = token.digest();
        let Some(record) = self.store.lookup_session(&token_hash) else {
            return Err(Rejection::Denied);
        };

        if record.expires_at <= Instant::now() {
            debug!(username = %record.username, "session expired");
            self.store.delete_session(&token_hash);
            return Err(Rejection::Denied);
        }

        if !self.store.identity_exists(&record.username) {
            self.store.delete_session(&token_hash);
            return Err(Rejection::Denied);
        }

        Ok(Identity {
            username: record.username,
        })
    }

    /// Drop a session. Unknown or already invalidated tokens are ignored.
    pub fn invalidate(&self, token: &SessionToken) {
        if self.store.delete_session(&token.digest()) {
            info!("session closed");
        }
    }
}
