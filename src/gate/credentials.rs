//! Typed username/credential pair validated before it reaches the gate.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::Rejection;

/// A non-empty username and a non-empty credential.
///
/// The credential is wrapped in `SecretString` so `Debug` output and logs
/// never contain it.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    credential: SecretString,
}

impl Credentials {
    /// Validate raw form input.
    ///
    /// # Errors
    /// Returns `Rejection::MissingField` if either value is empty.
    pub fn new(username: &str, credential: &str) -> Result<Self, Rejection> {
        if username.is_empty() || credential.is_empty() {
            return Err(Rejection::MissingField);
        }

        Ok(Self {
            username: username.to_string(),
            credential: SecretString::from(credential.to_string()),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact comparison against a stored credential, no normalization.
    ///
    /// Runs in constant time for equal-length inputs.
    #[must_use]
    pub fn matches(&self, stored: &SecretString) -> bool {
        self.credential
            .expose_secret()
            .as_bytes()
            .ct_eq(stored.expose_secret().as_bytes())
            .into()
    }

    pub(crate) fn into_parts(self) -> (String, SecretString) {
        (self.username, self.credential)
    }
}
