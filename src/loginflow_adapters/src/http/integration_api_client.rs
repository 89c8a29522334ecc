use async_trait::async_trait;
use loginflow_core::{
    ApiCredentials, IntegrationApi, IntegrationApiError,
    payloads::{LinkIdentityPayload, LinkedIdentity, LoginEventPayload, RiskAssessment, RiskPayload},
};
use secrecy::ExposeSecret;
use serde::Serialize;

/// HTTP implementation of the integration API port. One POST per call,
/// JSON body, bearer authorization; no retries and no timeout override
/// beyond the client default.
#[derive(Debug, Clone, Default)]
pub struct HttpIntegrationApi {
    client: reqwest::Client,
}

impl HttpIntegrationApi {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(credentials: &ApiCredentials, resource: &str) -> String {
        format!("{}/v2/{}", credentials.base_url(), resource)
    }

    async fn post<B>(
        &self,
        credentials: &ApiCredentials,
        resource: &str,
        body: &B,
    ) -> Result<reqwest::Response, IntegrationApiError>
    where
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(Self::endpoint(credentials, resource))
            .bearer_auth(credentials.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|error| IntegrationApiError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(resource, status = status.as_u16(), "integration API call rejected");
            return Err(IntegrationApiError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl IntegrationApi for HttpIntegrationApi {
    async fn send_login_event(
        &self,
        credentials: &ApiCredentials,
        payload: &LoginEventPayload,
    ) -> Result<(), IntegrationApiError> {
        self.post(credentials, "events", payload).await?;
        Ok(())
    }

    async fn link_identity(
        &self,
        credentials: &ApiCredentials,
        payload: &LinkIdentityPayload,
    ) -> Result<LinkedIdentity, IntegrationApiError> {
        self.post(credentials, "link-identity", payload)
            .await?
            .json::<LinkedIdentity>()
            .await
            .map_err(|error| IntegrationApiError::InvalidResponse(error.to_string()))
    }

    async fn score_login(
        &self,
        credentials: &ApiCredentials,
        payload: &RiskPayload,
    ) -> Result<RiskAssessment, IntegrationApiError> {
        self.post(credentials, "risk", payload)
            .await?
            .json::<RiskAssessment>()
            .await
            .map_err(|error| IntegrationApiError::InvalidResponse(error.to_string()))
    }
}
