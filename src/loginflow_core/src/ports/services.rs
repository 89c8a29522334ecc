use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::contract::DEFAULT_API_BASE_URL;
use crate::domain::payloads::{
    LinkIdentityPayload, LinkedIdentity, LoginEventPayload, RiskAssessment, RiskPayload,
};

#[derive(Debug, Error)]
pub enum IntegrationApiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("API returned status {0}")]
    Status(u16),
    #[error("Could not decode API response: {0}")]
    InvalidResponse(String),
}

/// Where and how to reach the integration API for one invocation, built
/// from the event's secrets and configuration bags.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_key: Secret<String>,
    base_url: String,
}

impl ApiCredentials {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Configured base URL with a single trailing slash trimmed, so path
    /// joining never produces a double slash.
    pub fn base_url(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }
}

/// Outbound port to the integration API. One POST per call, bearer
/// authorization, no retries; failure policy lives with the caller.
#[async_trait]
pub trait IntegrationApi: Send + Sync {
    /// `POST {base}/v2/events` - export a login event. The API returns no
    /// body of interest.
    async fn send_login_event(
        &self,
        credentials: &ApiCredentials,
        payload: &LoginEventPayload,
    ) -> Result<(), IntegrationApiError>;

    /// `POST {base}/v2/link-identity` - link the user to an external
    /// identity and return its id.
    async fn link_identity(
        &self,
        credentials: &ApiCredentials,
        payload: &LinkIdentityPayload,
    ) -> Result<LinkedIdentity, IntegrationApiError>;

    /// `POST {base}/v2/risk` - score the current login attempt.
    async fn score_login(
        &self,
        credentials: &ApiCredentials,
        payload: &RiskPayload,
    ) -> Result<RiskAssessment, IntegrationApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn default_base_url_is_used_when_not_overridden() {
        let credentials = ApiCredentials::new(Secret::from("key".to_owned()));
        assert_eq!(credentials.base_url(), "https://api.example.com");
    }

    #[test]
    fn a_single_trailing_slash_is_trimmed() {
        let credentials = ApiCredentials::new(Secret::from("key".to_owned()))
            .with_base_url("https://api.example.com/");
        assert_eq!(credentials.base_url(), "https://api.example.com");
    }

    #[quickcheck]
    fn trimming_is_insensitive_to_one_trailing_slash(base: String) -> bool {
        if base.ends_with('/') {
            return true;
        }
        let plain = ApiCredentials::new(Secret::from("key".to_owned())).with_base_url(base.clone());
        let slashed =
            ApiCredentials::new(Secret::from("key".to_owned())).with_base_url(format!("{base}/"));
        plain.base_url() == slashed.base_url()
    }
}
