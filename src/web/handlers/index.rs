use axum::{extract::Extension, http::HeaderMap, response::Response};
use std::sync::Arc;

use super::{flash, page, render, session::current_identity};
use crate::gate::Gate;

/// Home page: logged-in or logged-out view depending on the session.
pub async fn index(headers: HeaderMap, gate: Extension<Arc<Gate>>) -> Response {
    let flashes = flash::pending(&headers);
    let identity = current_identity(&headers, &gate);
    let html = render::index(
        identity.as_ref().map(|identity| identity.username.as_str()),
        &flashes,
    );
    page(html, !flashes.is_empty())
}
