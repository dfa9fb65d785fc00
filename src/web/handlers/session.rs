//! Session cookie handling and the access guard for protected pages.

use axum::{
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION},
        HeaderMap, HeaderValue, Uri,
    },
    response::Response,
};
use tracing::debug;

use super::{flash, flash::Flash, redirect};
use crate::gate::{AuthConfig, Gate, Identity, Rejection, SessionToken};

pub(crate) const SESSION_COOKIE_NAME: &str = "playgate_session";

/// Build an `HttpOnly` cookie carrying the session token.
pub(crate) fn session_cookie(
    config: &AuthConfig,
    token: &SessionToken,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}",
        token.as_str()
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Session token from a bearer header or the session cookie, in that order.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<SessionToken> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    flash::cookie_value(headers, SESSION_COOKIE_NAME)
        .filter(|value| !value.is_empty())
        .map(SessionToken::from)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(SessionToken::from(token))
    }
}

/// Identity of the current visitor, if any.
pub(crate) fn current_identity(headers: &HeaderMap, gate: &Gate) -> Option<Identity> {
    let token = extract_session_token(headers)?;
    gate.check_access(&token).ok()
}

/// Guard for protected pages.
///
/// On `Denied` the visitor is sent to `/login?next=<path>` with an info notice.
pub(crate) fn require_identity(
    headers: &HeaderMap,
    uri: &Uri,
    gate: &Gate,
) -> Result<(SessionToken, Identity), Response> {
    let outcome = extract_session_token(headers)
        .ok_or(Rejection::Denied)
        .and_then(|token| gate.check_access(&token).map(|identity| (token, identity)));

    outcome.map_err(|rejection| {
        debug!(path = uri.path(), "access denied");
        let next: String = url::form_urlencoded::byte_serialize(uri.path().as_bytes()).collect();
        let mut flashes = flash::pending(headers);
        flashes.push(Flash::info(rejection.to_string()));
        redirect(&format!("/login?next={next}"), &flashes, None)
    })
}
