//! One-shot notices carried to the next rendered page in a cookie.
//!
//! Cookie format: `playgate_flash=<category>.<base64url(message)>|...`

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use base64ct::{Base64UrlUnpadded, Encoding};

pub(crate) const FLASH_COOKIE_NAME: &str = "playgate_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashCategory {
    Success,
    Danger,
    Info,
}

impl FlashCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "danger" => Some(Self::Danger),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }
}

/// Read pending flashes from the request cookie. Malformed entries are skipped.
pub(crate) fn pending(headers: &HeaderMap) -> Vec<Flash> {
    let Some(raw) = cookie_value(headers, FLASH_COOKIE_NAME) else {
        return Vec::new();
    };
    raw.split('|').filter_map(decode_entry).collect()
}

/// `Set-Cookie` value storing `flashes` for the next request.
pub(crate) fn flash_cookie(flashes: &[Flash]) -> Result<HeaderValue, InvalidHeaderValue> {
    let value = flashes
        .iter()
        .map(|flash| {
            format!(
                "{}.{}",
                flash.category.as_str(),
                Base64UrlUnpadded::encode_string(flash.message.as_bytes())
            )
        })
        .collect::<Vec<_>>()
        .join("|");
    HeaderValue::from_str(&format!(
        "{FLASH_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

pub(crate) fn clear_flash_cookie() -> HeaderValue {
    HeaderValue::from_static("playgate_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn decode_entry(entry: &str) -> Option<Flash> {
    let (category, encoded) = entry.split_once('.')?;
    let category = FlashCategory::parse(category)?;
    let bytes = Base64UrlUnpadded::decode_vec(encoded).ok()?;
    let message = String::from_utf8(bytes).ok()?;
    Some(Flash { category, message })
}

/// Find a cookie by name across all `Cookie` headers.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                continue;
            };
            if key.trim() == name {
                return Some(val.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(set_cookie: &HeaderValue) -> HeaderMap {
        // Turn a Set-Cookie value into the Cookie header a browser would send back.
        let pair = set_cookie
            .to_str()
            .ok()
            .and_then(|value| value.split(';').next())
            .unwrap_or_default()
            .to_string();
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&pair) {
            headers.insert(COOKIE, value);
        }
        headers
    }

    #[test]
    fn pending_reads_what_flash_cookie_wrote() {
        let flashes = vec![
            Flash::info("You have been logged out."),
            Flash::danger("Ünïcode; with | separators"),
        ];
        let Ok(cookie) = flash_cookie(&flashes) else {
            panic!("flash cookie rejected");
        };
        assert_eq!(pending(&request_with(&cookie)), flashes);
    }

    #[test]
    fn pending_skips_malformed_entries() {
        let mut headers = HeaderMap::new();
        let good = Base64UrlUnpadded::encode_string(b"ok");
        let value = format!("playgate_flash=bogus.{good}|success.{good}|info.***|nodot");
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(COOKIE, value);
        }
        assert_eq!(pending(&headers), vec![Flash::success("ok")]);
    }

    #[test]
    fn pending_empty_without_cookie() {
        assert!(pending(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn cookie_value_finds_named_pair() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("a=1; playgate_flash=x; b=2"));
        assert_eq!(
            cookie_value(&headers, "playgate_flash"),
            Some("x".to_string())
        );
        assert_eq!(cookie_value(&headers, "b"), Some("2".to_string()));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn clear_flash_cookie_expires() {
        let cookie = clear_flash_cookie();
        assert!(cookie
            .to_str()
            .is_ok_and(|value| value.starts_with("playgate_flash=;") && value.contains("Max-Age=0")));
    }
}
