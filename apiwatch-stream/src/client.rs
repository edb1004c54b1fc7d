use apiwatch_core::config::CollectorConfig;
use apiwatch_core::error::WatchError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Request/response client for the collector's session gate and clear
/// command. These calls never touch engine state — the owning session
/// applies their outcome.
#[derive(Debug, Clone)]
pub struct CollectorClient {
    http: reqwest::Client,
    auth_url: String,
    clear_url: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    message: String,
}

impl CollectorClient {
    pub fn new(auth_url: impl Into<String>, clear_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: auth_url.into(),
            clear_url: clear_url.into(),
        }
    }

    pub fn from_config(config: &CollectorConfig) -> Self {
        Self::new(config.auth_url.clone(), config.clear_url.clone())
    }

    /// POST credentials to the session gate. `Ok(true)` only when the
    /// collector answers `message == "success"`; a rejection leaves the
    /// caller free to retry without side effects.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, WatchError> {
        let resp = self
            .http
            .post(&self.auth_url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| WatchError::AuthFailed(e.to_string()))?;

        let body: AuthResponse = resp
            .json()
            .await
            .map_err(|e| WatchError::AuthFailed(format!("bad auth response: {e}")))?;

        if body.message == "success" {
            info!(username = %username, "Login accepted");
            Ok(true)
        } else {
            warn!(username = %username, "Login rejected");
            Ok(false)
        }
    }

    /// Ask the collector to drop its captured log. Callers clear local
    /// state only after this succeeds — there is no partial clear.
    pub async fn clear(&self) -> Result<(), WatchError> {
        let resp = self
            .http
            .post(&self.clear_url)
            .send()
            .await
            .map_err(|e| WatchError::CommandFailed(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WatchError::CommandFailed(format!(
                "clear rejected: {}",
                resp.status()
            )));
        }

        info!("Collector log cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_configured_endpoints() {
        let config = CollectorConfig::default();
        let client = CollectorClient::from_config(&config);
        assert_eq!(client.auth_url, "http://127.0.0.1:8080/auth");
        assert_eq!(client.clear_url, "http://127.0.0.1:8080/api/clear");
    }

    #[tokio::test]
    async fn unreachable_collector_surfaces_command_failure() {
        let client = CollectorClient::new("http://127.0.0.1:1/auth", "http://127.0.0.1:1/api/clear");

        let err = client.clear().await.unwrap_err();
        assert!(matches!(err, WatchError::CommandFailed(_)));
        assert!(err.is_recoverable());

        let err = client.login("admin", "secret").await.unwrap_err();
        assert!(matches!(err, WatchError::AuthFailed(_)));
    }
}
