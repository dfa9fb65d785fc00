use axum::{
    extract::Extension,
    http::{HeaderMap, Uri},
    response::Response,
};
use std::sync::Arc;

use super::{flash, page, render, session::require_identity};
use crate::gate::Gate;

/// Protected games page.
pub async fn games(uri: Uri, headers: HeaderMap, gate: Extension<Arc<Gate>>) -> Response {
    let (_, identity) = match require_identity(&headers, &uri, &gate) {
        Ok(access) => access,
        Err(response) => return response,
    };

    let flashes = flash::pending(&headers);
    page(render::games(&identity.username, &flashes), !flashes.is_empty())
}
