//! Map parsed command-line arguments to an action.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::auth;

/// Map validated CLI matches to a server action.
#[must_use]
pub fn handler(matches: &clap::ArgMatches) -> Action {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(5000);
    let auth_opts = auth::Options::parse(matches);

    Action::Server(Args {
        port,
        session_ttl_seconds: auth_opts.session_ttl_seconds,
        session_cookie_secure: auth_opts.session_cookie_secure,
        demo_user: auth_opts.demo_user,
    })
}
