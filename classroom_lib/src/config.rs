//! Client configuration read from the environment.

use std::sync::Arc;
use std::time::Duration;

use classroom_api::{Client, MemorySession, SessionCredentials, SessionStore, DEFAULT_BASE_URL};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the API lives and which credentials to start with.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            access_token: None,
            refresh_token: None,
        }
    }
}

impl ClientConfig {
    /// Reads `CLASSROOM_API_URL`, `CLASSROOM_API_TIMEOUT_SECS`,
    /// `CLASSROOM_ACCESS_TOKEN` and `CLASSROOM_REFRESH_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty("CLASSROOM_API_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(env_u64(&lookup, "CLASSROOM_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            access_token: non_empty("CLASSROOM_ACCESS_TOKEN"),
            refresh_token: non_empty("CLASSROOM_REFRESH_TOKEN"),
        }
    }

    /// Session seeded with the configured tokens.
    pub fn session(&self) -> Arc<MemorySession> {
        Arc::new(MemorySession::with_credentials(SessionCredentials {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }))
    }

    /// Builds a client using `session` for bearer tokens.
    pub fn build_client(&self, session: Arc<dyn SessionStore>) -> Result<Client, classroom_api::Error> {
        Client::with_base_url(&self.base_url, session)?.with_timeout(self.timeout)
    }
}

fn env_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|val| val.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CLASSROOM_API_URL", "https://school.example.com/api"),
            ("CLASSROOM_API_TIMEOUT_SECS", "5"),
            ("CLASSROOM_ACCESS_TOKEN", "abc"),
            ("CLASSROOM_REFRESH_TOKEN", "def"),
        ]));
        assert_eq!(config.base_url, "https://school.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.refresh_token.as_deref(), Some("def"));
        assert!(config.session().credentials().is_authenticated());
    }

    #[test]
    fn bad_timeout_falls_back() {
        for raw in ["soon", "0", "-1"] {
            let config =
                ClientConfig::from_lookup(lookup_from(&[("CLASSROOM_API_TIMEOUT_SECS", raw)]));
            assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
    }

    #[test]
    fn blank_token_is_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[("CLASSROOM_ACCESS_TOKEN", "  ")]));
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn build_client_uses_base_url() {
        let config = ClientConfig::from_lookup(lookup_from(&[(
            "CLASSROOM_API_URL",
            "http://127.0.0.1:8000/api",
        )]));
        let client = config.build_client(config.session()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
    }
}
