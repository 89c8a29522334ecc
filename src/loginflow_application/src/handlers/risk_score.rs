use loginflow_core::{
    AccessControl, ApiCredentials, IntegrationApi, LoginEvent, TokenClaims,
    contract::{DENY_API_REQUEST_FAILED, DENY_RISK_THRESHOLD_REACHED, RISK_SCORE_CLAIM},
    payloads::{RiskLocation, RiskPayload},
};
use serde_json::Value;

use crate::outcome::Outcome;

/// Configuration for the risk-scoring integration.
pub struct RiskScoreConfig {
    pub credentials: ApiCredentials,
    /// Parsed `RISK_SCORE_THRESHOLD`. Values below 1, or anything that
    /// does not parse as an integer, disable threshold denial.
    pub threshold: Option<i64>,
}

impl RiskScoreConfig {
    pub fn from_event(event: &LoginEvent) -> Option<Self> {
        let api_key = event.secret("API_KEY")?.clone();
        let mut credentials = ApiCredentials::new(api_key);
        if let Some(base_url) = event.config("API_BASE_URL") {
            credentials = credentials.with_base_url(base_url);
        }
        let threshold = event
            .config("RISK_SCORE_THRESHOLD")
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        Some(Self {
            credentials,
            threshold,
        })
    }

    fn active_threshold(&self) -> Option<i64> {
        self.threshold.filter(|threshold| *threshold >= 1)
    }
}

/// Scores every login attempt. This is the one fail-closed integration:
/// if the risk API cannot be reached, the login is denied rather than
/// allowed through unscored.
pub struct RiskScoreHandler<A>
where
    A: IntegrationApi,
{
    api: A,
}

impl<A> RiskScoreHandler<A>
where
    A: IntegrationApi,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    #[tracing::instrument(name = "RiskScoreHandler::execute", skip_all)]
    pub async fn execute<C>(&self, event: &LoginEvent, control: &C) -> Outcome
    where
        C: TokenClaims + AccessControl,
    {
        let Some(config) = RiskScoreConfig::from_event(event) else {
            tracing::info!("missing required API key, skipping risk scoring");
            return Outcome::Skipped;
        };

        let payload = build_payload(event);

        let assessment = match self.api.score_login(&config.credentials, &payload).await {
            Ok(assessment) => assessment,
            Err(error) => {
                tracing::warn!(%error, "risk score call failed, denying access");
                control.deny(DENY_API_REQUEST_FAILED);
                return Outcome::Denied(DENY_API_REQUEST_FAILED);
            }
        };

        if let Some(threshold) = config.active_threshold() {
            let score = assessment.score.as_f64().unwrap_or(0.0);
            if score > threshold as f64 {
                control.deny(DENY_RISK_THRESHOLD_REACHED);
                return Outcome::Denied(DENY_RISK_THRESHOLD_REACHED);
            }
        }

        control.set_custom_claim(RISK_SCORE_CLAIM, Value::Number(assessment.score));
        Outcome::Completed
    }
}

fn build_payload(event: &LoginEvent) -> RiskPayload {
    RiskPayload {
        user_email: event.user.email.clone(),
        user_email_verified: event.user.email_verified,
        user_phone: event.user.phone_number.clone(),
        user_phone_verified: event.user.phone_verified,
        login_ip: event.request.ip.clone(),
        login_user_agent: event.request.user_agent.clone(),
        location: event.request.geoip.as_ref().map(RiskLocation::from),
    }
}
