//! Remote city directory client.
//!
//! Single GET per resolution against an external directory service, with a
//! static access token header and a bounded timeout. No retries: a failed
//! remote lookup just means `NotFound` for that call, and the user re-enters
//! the cascade by typing again.

use super::types::RemoteError;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Minimal record shape returned by the directory service.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCity {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_translations: HashMap<String, String>,
}

/// Queries an external city directory.
pub trait RemoteDirectory: Send + Sync {
    fn search(&self, term: &str) -> Result<Vec<RemoteCity>, RemoteError>;
}

/// Remote endpoint configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub const DEFAULT_URL: &'static str = "https://api.travelpayouts.com/data/ru/cities.json";

    /// Build from environment, falling back to the compiled-in endpoint.
    /// `AVIACODE_API_URL` overrides the endpoint, `AVIACODE_API_TOKEN`
    /// supplies the credential.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("AVIACODE_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_URL.to_string()),
            access_token: std::env::var("AVIACODE_API_TOKEN").unwrap_or_default(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// ureq-backed directory client.
pub struct HttpDirectory {
    config: RemoteConfig,
    agent: ureq::Agent,
}

impl HttpDirectory {
    pub fn new(config: RemoteConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .build();
        Self { config, agent }
    }
}

impl RemoteDirectory for HttpDirectory {
    fn search(&self, term: &str) -> Result<Vec<RemoteCity>, RemoteError> {
        let response = self
            .agent
            .get(&self.config.base_url)
            .query("term", term)
            .set("X-Access-Token", &self.config.access_token)
            .set("User-Agent", "aviacode/0.3")
            .call()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        response
            .into_json()
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}
