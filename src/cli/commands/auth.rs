use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::gate::MAX_SESSION_TTL_SECONDS;

pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_SESSION_COOKIE_SECURE: &str = "session-cookie-secure";
pub const ARG_DEMO_USER: &str = "demo-user";

#[derive(Debug)]
pub struct Options {
    pub session_ttl_seconds: u64,
    pub session_cookie_secure: bool,
    pub demo_user: bool,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            session_ttl_seconds: matches
                .get_one::<u64>(ARG_SESSION_TTL_SECONDS)
                .copied()
                .unwrap_or(604_800),
            session_cookie_secure: matches.get_flag(ARG_SESSION_COOKIE_SECURE),
            demo_user: matches.get_flag(ARG_DEMO_USER),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session cookie TTL in seconds")
                .env("PLAYGATE_SESSION_TTL_SECONDS")
                .default_value("604800")
                .value_parser(clap::value_parser!(u64).range(..=MAX_SESSION_TTL_SECONDS)),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE_SECURE)
                .long(ARG_SESSION_COOKIE_SECURE)
                .help("Mark the session cookie Secure (serve over HTTPS)")
                .env("PLAYGATE_SESSION_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_DEMO_USER)
                .long(ARG_DEMO_USER)
                .help("Seed the demo account testuser / password123 at startup")
                .env("PLAYGATE_DEMO_USER")
                .action(ArgAction::SetTrue),
        )
}
