//! Identity directory and session table.

use parking_lot::Mutex;
use secrecy::SecretString;
use std::collections::{hash_map::Entry, HashMap};
use std::time::Instant;

use super::{Credentials, Rejection};

/// Server-side view of an active session, keyed by the token digest.
#[derive(Clone, Debug)]
pub struct SessionRecord {
    pub username: String,
    pub expires_at: Instant,
}

/// Backing storage for the gate.
///
/// Implementations must make `insert_identity` an atomic check-then-insert,
/// and session inserts/deletes atomic with respect to each other.
pub trait Store: Send + Sync {
    /// Insert a new identity.
    ///
    /// # Errors
    /// Returns `Rejection::DuplicateIdentity` if the username is taken.
    fn insert_identity(&self, credentials: Credentials) -> Result<(), Rejection>;

    /// True when the username exists and its stored credential matches exactly.
    fn verify_identity(&self, credentials: &Credentials) -> bool;

    fn identity_exists(&self, username: &str) -> bool;

    /// Store a session; expired records may be swept at the same time.
    fn insert_session(&self, token_hash: Vec<u8>, record: SessionRecord);

    fn lookup_session(&self, token_hash: &[u8]) -> Option<SessionRecord>;

    /// Remove a session, returning whether one was present.
    fn delete_session(&self, token_hash: &[u8]) -> bool;

    fn identity_count(&self) -> usize;

    fn session_count(&self) -> usize;
}

/// Process-local store; everything is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    identities: Mutex<HashMap<String, SecretString>>,
    sessions: Mutex<HashMap<Vec<u8>, SessionRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn insert_identity(&self, credentials: Credentials) -> Result<(), Rejection> {
        let (username, credential) = credentials.into_parts();
        match self.identities.lock().entry(username) {
            Entry::Occupied(_) => Err(Rejection::DuplicateIdentity),
            Entry::Vacant(entry) => {
                entry.insert(credential);
                Ok(())
            }
        }
    }

    fn verify_identity(&self, credentials: &Credentials) -> bool {
        self.identities
            .lock()
            .get(credentials.username())
            .is_some_and(|stored| credentials.matches(stored))
    }

    fn identity_exists(&self, username: &str) -> bool {
        self.identities.lock().contains_key(username)
    }

    fn insert_session(&self, token_hash: Vec<u8>, record: SessionRecord) {
        let now = Instant::now();
        let mut sessions = self.sessions.lock();
        sessions.retain(|_, existing| existing.expires_at > now);
        sessions.insert(token_hash, record);
    }

    fn lookup_session(&self, token_hash: &[u8]) -> Option<SessionRecord> {
        self.sessions.lock().get(token_hash).cloned()
    }

    fn delete_session(&self, token_hash: &[u8]) -> bool {
        self.sessions.lock().remove(token_hash).is_some()
    }

    fn identity_count(&self) -> usize {
        self.identities.lock().len()
    }

    fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
