use axum::{
    extract::Extension,
    http::{HeaderMap, Uri},
    response::Response,
};
use std::sync::Arc;
use tracing::error;

use super::{
    flash::{self, Flash},
    redirect,
    session::{clear_session_cookie, require_identity},
};
use crate::gate::Gate;

/// End the current session and return to the home page.
pub async fn logout(uri: Uri, headers: HeaderMap, gate: Extension<Arc<Gate>>) -> Response {
    let (token, _) = match require_identity(&headers, &uri, &gate) {
        Ok(access) => access,
        Err(response) => return response,
    };

    gate.invalidate(&token);

    // Always clear the cookie, even though the server-side record is already gone.
    let cookie = clear_session_cookie(gate.config())
        .map_err(|err| error!("Failed to build session cookie: {err}"))
        .ok();

    let mut flashes = flash::pending(&headers);
    flashes.push(Flash::info("You have been logged out."));
    redirect("/", &flashes, cookie)
}
