use axum::{
    extract::Extension,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

use crate::{gate::Gate, GIT_COMMIT_HASH};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    identities: usize,
    sessions: usize,
}

// axum handler for health
pub async fn health(gate: Extension<Arc<Gate>>) -> impl IntoResponse {
    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        identities: gate.store().identity_count(),
        sessions: gate.store().session_count(),
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let headers = format!("{}:{}:{}", health.name, health.version, short_hash)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();

            headers.insert("X-App", x_app_header_value);

            headers
        })
        .map_err(|err| {
            error!("Failed to parse X-App header: {}", err);
        });

    // Fall back to no headers rather than failing the health check
    let headers = headers.unwrap_or_else(|()| HeaderMap::new());

    (headers, Json(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::AuthConfig;
    use axum::{body::to_bytes, http::StatusCode};

    #[tokio::test]
    async fn health_reports_counts() {
        let gate = Arc::new(Gate::in_memory(AuthConfig::new()));
        assert_eq!(gate.register("alice", "pw"), Ok(()));
        assert!(gate.authenticate("alice", "pw").is_ok());

        let response = health(Extension(gate)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("X-App")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with(concat!(
                env!("CARGO_PKG_NAME"),
                ":",
                env!("CARGO_PKG_VERSION")
            ))));

        let body = to_bytes(response.into_body(), usize::MAX).await;
        let json: Option<serde_json::Value> = body
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok());
        let json = json.unwrap_or_default();
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["identities"], 1);
        assert_eq!(json["sessions"], 1);
    }
}
