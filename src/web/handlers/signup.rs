use axum::{extract::Extension, http::HeaderMap, response::Response, Form};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    flash::{self, Flash},
    page, redirect, render, CredentialsForm,
};
use crate::gate::Gate;

/// Sign-up form.
pub async fn form(headers: HeaderMap) -> Response {
    let flashes = flash::pending(&headers);
    page(render::signup(&flashes), !flashes.is_empty())
}

/// Register a new identity.
///
/// Success sends the visitor to `/login`; any rejection back to `/signup`
/// with the reason flashed.
#[instrument(skip_all)]
pub async fn submit(
    headers: HeaderMap,
    gate: Extension<Arc<Gate>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let mut flashes = flash::pending(&headers);

    match gate.register(&form.username, &form.password) {
        Ok(()) => {
            flashes.push(Flash::success("Registration successful! Please log in."));
            redirect("/login", &flashes, None)
        }
        Err(rejection) => {
            debug!(?rejection, "registration rejected");
            flashes.push(Flash::danger(rejection.to_string()));
            redirect("/signup", &flashes, None)
        }
    }
}
