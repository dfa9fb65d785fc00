pub mod auth;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("playgate")
        .about("Session-gated games portal")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("5000")
                .env("PLAYGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "playgate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Session-gated games portal".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("PLAYGATE_PORT", None::<&str>),
                ("PLAYGATE_SESSION_TTL_SECONDS", None),
                ("PLAYGATE_SESSION_COOKIE_SECURE", None),
                ("PLAYGATE_DEMO_USER", None),
                ("PLAYGATE_LOG_LEVEL", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["playgate"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(5000));
                assert_eq!(
                    matches
                        .get_one::<u64>(auth::ARG_SESSION_TTL_SECONDS)
                        .copied(),
                    Some(604_800)
                );
                assert!(!matches.get_flag(auth::ARG_SESSION_COOKIE_SECURE));
                assert!(!matches.get_flag(auth::ARG_DEMO_USER));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(0)
                );
            },
        );
    }

    #[test]
    fn test_check_args() {
        let matches = new().get_matches_from(vec![
            "playgate",
            "--port",
            "8080",
            "--session-ttl-seconds",
            "120",
            "--session-cookie-secure",
            "--demo-user",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(
            matches
                .get_one::<u64>(auth::ARG_SESSION_TTL_SECONDS)
                .copied(),
            Some(120)
        );
        assert!(matches.get_flag(auth::ARG_SESSION_COOKIE_SECURE));
        assert!(matches.get_flag(auth::ARG_DEMO_USER));
    }

    #[test]
    fn test_session_ttl_upper_bound() {
        let result = new().try_get_matches_from(vec![
            "playgate",
            "--session-ttl-seconds",
            "18446744073709551615",
        ]);
        assert!(result.is_err());

        let max = crate::gate::MAX_SESSION_TTL_SECONDS.to_string();
        let matches = new().try_get_matches_from(vec!["playgate", "--session-ttl-seconds", &max]);
        assert_eq!(
            matches
                .ok()
                .and_then(|m| m.get_one::<u64>(auth::ARG_SESSION_TTL_SECONDS).copied()),
            Some(crate::gate::MAX_SESSION_TTL_SECONDS)
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PLAYGATE_PORT", Some("443")),
                ("PLAYGATE_SESSION_TTL_SECONDS", Some("30")),
                ("PLAYGATE_DEMO_USER", Some("true")),
                ("PLAYGATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["playgate"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches
                        .get_one::<u64>(auth::ARG_SESSION_TTL_SECONDS)
                        .copied(),
                    Some(30)
                );
                assert!(matches.get_flag(auth::ARG_DEMO_USER));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("PLAYGATE_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["playgate"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for count in 0..5_usize {
            temp_env::with_vars([("PLAYGATE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["playgate".to_string()];
                if count > 0 {
                    args.push(format!("-{}", "v".repeat(count)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(count).ok()
                );
            });
        }
    }
}
