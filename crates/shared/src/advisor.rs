//! HTTP client for the advisor text-generation gateway.
//!
//! Uses `reqwest` for the outbound completion call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AdvisorConfig;

/// Advisor gateway errors.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Failed to build the HTTP client.
    #[error("Failed to build advisor client: {0}")]
    BuildError(String),
    /// Request to the gateway failed.
    #[error("Advisor request failed: {0}")]
    RequestError(String),
    /// Gateway returned a non-success status.
    #[error("Advisor gateway returned status {0}")]
    GatewayStatus(u16),
    /// Gateway returned an unparseable body.
    #[error("Invalid advisor response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

/// Client for the external text-generation gateway that turns a
/// financial profile prompt into an advisory plan.
#[derive(Clone)]
pub struct AdvisorClient {
    config: AdvisorConfig,
    http: reqwest::Client,
}

impl std::fmt::Debug for AdvisorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorClient")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .field("api_key", &"[hidden]")
            .finish()
    }
}

impl AdvisorClient {
    /// Creates a new advisor client.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::BuildError` if the HTTP client cannot be built.
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::BuildError(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Sends a prompt to the gateway and returns the generated plan text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the gateway responds with a
    /// non-success status, or the body cannot be parsed.
    pub async fn generate_plan(&self, prompt: &str) -> Result<String, AdvisorError> {
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
        };

        let mut builder = self.http.post(&self.config.api_url).json(&request);
        if !self.config.api_key.is_empty() {
            builder = builder.bearer_auth(&self.config.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AdvisorError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::GatewayStatus(status.as_u16()));
        }

        response
            .json::<CompletionResponse>()
            .await
            .map(|body| body.text)
            .map_err(|e| AdvisorError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_defaults() {
        let client = AdvisorClient::new(AdvisorConfig::default()).unwrap();
        assert_eq!(client.config.model, "gemini-flash-latest");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = AdvisorClient::new(AdvisorConfig {
            api_key: "secret-key".to_string(),
            ..AdvisorConfig::default()
        })
        .unwrap();

        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
    }
}
