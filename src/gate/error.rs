use thiserror::Error;

/// Expected, user-facing outcomes of the gate operations.
///
/// The `Display` text is what the web layer flashes to the visitor.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Username and password are required.")]
    MissingField,
    #[error("Username already taken. Please choose another.")]
    DuplicateIdentity,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Please log in to access this page.")]
    Denied,
}
