use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::Response,
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::{
    flash::{self, Flash},
    page, redirect, render, safe_next,
    session::{extract_session_token, session_cookie},
    CredentialsForm,
};
use crate::gate::Gate;

#[derive(Deserialize, Debug, Default)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Login form.
pub async fn form(headers: HeaderMap) -> Response {
    let flashes = flash::pending(&headers);
    page(render::login(&flashes), !flashes.is_empty())
}

/// Check credentials and open a session.
///
/// Success sets the session cookie and redirects to `next` (local paths only)
/// or `/games`. Failure re-renders the form with a uniform error.
///
/// A successful login replaces any session the request already carried.
#[instrument(skip_all)]
pub async fn submit(
    headers: HeaderMap,
    gate: Extension<Arc<Gate>>,
    Query(query): Query<NextQuery>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let mut flashes = flash::pending(&headers);
    let had_pending = !flashes.is_empty();

    match gate.authenticate(&form.username, &form.password) {
        Ok(session) => {
            if let Some(previous) = extract_session_token(&headers) {
                gate.invalidate(&previous);
            }

            let cookie = match session_cookie(gate.config(), &session.token) {
                Ok(cookie) => cookie,
                Err(err) => {
                    error!("Failed to build session cookie: {err}");
                    gate.invalidate(&session.token);
                    flashes.push(Flash::danger("Unable to start a session."));
                    return page(render::login(&flashes), had_pending);
                }
            };

            flashes.push(Flash::success("Successfully logged in!"));
            let target = safe_next(query.next.as_deref()).unwrap_or("/games");
            let response = redirect(target, &flashes, Some(cookie));
            if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
                gate.invalidate(&session.token);
            }
            response
        }
        Err(rejection) => {
            debug!(?rejection, "login rejected");
            flashes.push(Flash::danger(rejection.to_string()));
            page(render::login(&flashes), had_pending)
        }
    }
}
