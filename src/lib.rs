//! # Playgate
//!
//! A small games portal behind a login. Visitors register a username and
//! password, log in to receive a session cookie, reach the protected `/games`
//! page, and log out again.
//!
//! ## Session Authentication Gate
//!
//! All access decisions go through [`gate::Gate`], which owns the identity
//! directory and the session table through an injected [`gate::Store`].
//! The HTTP layer in [`web`] only parses forms, renders HTML and turns gate
//! outcomes into redirects and one-shot flash notices.
//!
//! > **Warning:** credentials are stored and compared in plaintext and
//! > everything lives in memory. Do not expose this service to real users.

pub mod cli;
pub mod gate;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
