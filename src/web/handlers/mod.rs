//! Route handlers and shared response helpers.

pub mod flash;
pub mod games;
pub mod health;
pub mod index;
pub mod login;
pub mod logout;
pub(crate) mod render;
pub(crate) mod session;
pub mod signup;

use axum::{
    http::{
        header::{CONTENT_TYPE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;
use url::Url;

use self::flash::Flash;

/// Username/password form body shared by signup and login.
///
/// Absent fields deserialize to empty strings so they are rejected by
/// validation rather than by the extractor.
#[derive(Deserialize, Default)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `303 See Other` to `location`, carrying `flashes` and an optional extra cookie.
pub(crate) fn redirect(location: &str, flashes: &[Flash], cookie: Option<HeaderValue>) -> Response {
    let mut headers = HeaderMap::new();

    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(LOCATION, value);
        }
        Err(err) => {
            error!("Invalid redirect location {location:?}: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    if let Some(cookie) = cookie {
        headers.append(SET_COOKIE, cookie);
    }

    if !flashes.is_empty() {
        match flash::flash_cookie(flashes) {
            Ok(cookie) => {
                headers.append(SET_COOKIE, cookie);
            }
            Err(err) => error!("Failed to build flash cookie: {err}"),
        }
    }

    (StatusCode::SEE_OTHER, headers).into_response()
}

/// HTML response; clears the flash cookie when the page displayed pending flashes.
pub(crate) fn page(html: String, consumed_flashes: bool) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    if consumed_flashes {
        headers.append(SET_COOKIE, flash::clear_flash_cookie());
    }
    (StatusCode::OK, headers, html).into_response()
}

/// Accept only same-site relative paths as post-login targets.
pub(crate) fn safe_next(next: Option<&str>) -> Option<&str> {
    let next = next?.trim();
    // Must survive as a Location header value.
    if next.is_empty() || !next.bytes().all(|b| b.is_ascii_graphic()) {
        return None;
    }
    if Url::parse(next).is_ok() {
        return None;
    }
    if !next.starts_with('/') || next.starts_with("//") || next.starts_with("/\\") {
        return None;
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_next_accepts_local_paths() {
        assert_eq!(safe_next(Some("/games")), Some("/games"));
        assert_eq!(safe_next(Some("/games?level=2")), Some("/games?level=2"));
    }

    #[test]
    fn safe_next_rejects_external_targets() {
        assert_eq!(safe_next(None), None);
        assert_eq!(safe_next(Some("")), None);
        assert_eq!(safe_next(Some("https://evil.example/")), None);
        assert_eq!(safe_next(Some("//evil.example/")), None);
        assert_eq!(safe_next(Some("/\\evil.example")), None);
        assert_eq!(safe_next(Some("javascript:alert(1)")), None);
        assert_eq!(safe_next(Some("games")), None);
    }

    #[test]
    fn safe_next_rejects_unsendable_bytes() {
        assert_eq!(safe_next(Some("/games\rx")), None);
        assert_eq!(safe_next(Some("/games\nSet-Cookie: x=1")), None);
        assert_eq!(safe_next(Some("/ga\tmes")), None);
        assert_eq!(safe_next(Some("/games\u{7f}")), None);
        assert_eq!(safe_next(Some("/jeux/é")), None);
        assert_eq!(safe_next(Some("/games%0Dx")), Some("/games%0Dx"));
    }

    #[test]
    fn redirect_sets_location_and_flash() {
        let response = redirect("/login", &[Flash::success("done")], None);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
        assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 1);
    }

    #[test]
    fn redirect_without_flashes_sets_no_cookie() {
        let response = redirect("/", &[], None);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn page_clears_consumed_flashes() {
        let response = page("<p>hi</p>".to_string(), true);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("Max-Age=0")));

        let response = page("<p>hi</p>".to_string(), false);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn credentials_form_debug_redacts_password() {
        let form = CredentialsForm {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{form:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
