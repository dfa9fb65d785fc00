use crate::{
    gate::{AuthConfig, Gate, MemoryStore},
    web,
};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEMO_USERNAME: &str = "testuser";
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub session_ttl_seconds: u64,
    pub session_cookie_secure: bool,
    pub demo_user: bool,
}

/// Build the gate from `args`, seeding the demo account when requested.
/// # Errors
/// Returns an error if the demo account cannot be registered.
pub fn build_gate(args: &Args) -> Result<Gate> {
    let config = AuthConfig::new()
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_session_cookie_secure(args.session_cookie_secure);

    debug!("Auth config: {:?}", config);

    let gate = Gate::new(config, Arc::new(MemoryStore::new()));

    if args.demo_user {
        gate.register(DEMO_USERNAME, DEMO_PASSWORD)
            .map_err(|rejection| anyhow!("Failed to seed demo user: {rejection}"))?;
        info!("Test user: {DEMO_USERNAME} / {DEMO_PASSWORD}");
    }

    Ok(gate)
}

/// Execute the server action.
/// # Errors
/// Returns an error if the gate cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let gate = Arc::new(build_gate(&args)?);

    web::new(args.port, gate).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(demo_user: bool) -> Args {
        Args {
            port: 0,
            session_ttl_seconds: 60,
            session_cookie_secure: true,
            demo_user,
        }
    }

    #[test]
    fn build_gate_applies_config() {
        let gate = build_gate(&args(false));
        assert_eq!(
            gate.as_ref().ok().map(|g| g.config().session_ttl_seconds()),
            Some(60)
        );
        assert_eq!(
            gate.as_ref().ok().map(|g| g.config().session_cookie_secure()),
            Some(true)
        );
        assert_eq!(
            gate.as_ref().ok().map(|g| g.store().identity_count()),
            Some(0)
        );
    }

    #[test]
    fn build_gate_seeds_demo_user() {
        let Ok(gate) = build_gate(&args(true)) else {
            panic!("gate not built");
        };
        assert!(gate.authenticate(DEMO_USERNAME, DEMO_PASSWORD).is_ok());
    }
}
