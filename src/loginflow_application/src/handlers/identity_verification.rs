use chrono::Utc;
use loginflow_core::{
    AccessControl, EncodeTokenRequest, IdvMetadata, LoginEvent, RedirectFlow, TokenClaims,
    UserMetadataStore, ValidateTokenRequest,
    contract::{
        DENY_IDV_CONFIGURATION_ERROR, DENY_IDV_INTERACTION_REQUIRED, DENY_IDV_VERIFICATION_FAILED,
        IDV_ID_CLAIM, IDV_LAST_CHECK_CLAIM, IDV_STATUS_CLAIM, IDV_STATUS_SKIPPED,
        IDV_STATUS_SUCCESS, IDV_STATUS_VALID, METADATA_NAMESPACE, REDIRECT_TOKEN_PARAMETER,
        REDIRECT_TOKEN_TTL_SECONDS,
    },
};
use secrecy::Secret;
use serde_json::{Map, Value};

use crate::outcome::Outcome;

/// Configuration for the identity-verification integration.
pub struct IdvConfig {
    pub token_secret: Secret<String>,
    /// Host of the external verification service.
    pub domain: String,
    /// Freshness window in seconds for a cached successful check. When
    /// absent, cached checks never count as fresh.
    pub expires_in: Option<i64>,
    /// Per-application policy: `true` switches every failure branch from
    /// fail-open to fail-closed.
    pub required: bool,
}

impl IdvConfig {
    /// Reads the per-application policy flag on its own, so denial
    /// decisions can be made even when the rest of the config is absent.
    pub fn required(event: &LoginEvent) -> bool {
        event.client.metadata.get("IDV_REQUIRED").map(String::as_str) == Some("true")
    }

    pub fn from_event(event: &LoginEvent) -> Option<Self> {
        let token_secret = event.secret("TOKEN_SECRET")?.clone();
        let domain = event.config("IDV_DOMAIN")?.to_string();
        let expires_in = event
            .config("IDV_EXPIRES_IN")
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        Some(Self {
            token_secret,
            domain,
            expires_in,
            required: Self::required(event),
        })
    }
}

/// Two-phase identity verification. The first pass either accepts a
/// fresh cached check or redirects the user agent to the verification
/// domain with a short-lived signed token; the continuation validates
/// the token the verification service sent back and records the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityVerificationHandler;

impl IdentityVerificationHandler {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(name = "IdentityVerificationHandler::execute", skip_all)]
    pub async fn execute<C>(&self, event: &LoginEvent, control: &C) -> Outcome
    where
        C: TokenClaims + AccessControl + RedirectFlow,
    {
        let required = IdvConfig::required(event);

        let Some(config) = IdvConfig::from_event(event) else {
            tracing::warn!("missing required identity verification configuration");
            if required {
                control.deny(DENY_IDV_CONFIGURATION_ERROR);
                return Outcome::Denied(DENY_IDV_CONFIGURATION_ERROR);
            }
            return Outcome::Skipped;
        };

        let stored: IdvMetadata = event
            .user
            .namespaced_metadata(METADATA_NAMESPACE)
            .unwrap_or_default();

        // The stored id is surfaced regardless of which branch follows.
        if let Some(id) = stored.id.as_deref() {
            control.set_custom_claim(IDV_ID_CLAIM, Value::from(id));
        }

        if let (Some(last_check), Some(expires_in)) = (stored.last_successful_check, config.expires_in)
            && last_check > Utc::now().timestamp() - expires_in
        {
            control.set_custom_claim(IDV_STATUS_CLAIM, Value::from(IDV_STATUS_VALID));
            control.set_custom_claim(IDV_LAST_CHECK_CLAIM, Value::from(last_check));
            return Outcome::Completed;
        }

        if !control.can_redirect() {
            if config.required {
                control.deny(DENY_IDV_INTERACTION_REQUIRED);
                return Outcome::Denied(DENY_IDV_INTERACTION_REQUIRED);
            }
            control.set_custom_claim(IDV_STATUS_CLAIM, Value::from(IDV_STATUS_SKIPPED));
            return Outcome::Completed;
        }

        // Include the stored id, if any, so the verification service can
        // match the returning user.
        let mut payload = Map::new();
        if let Some(id) = stored.id {
            payload.insert("id".to_string(), Value::String(id));
        }

        let token = match control.encode_token(EncodeTokenRequest {
            expires_in_seconds: REDIRECT_TOKEN_TTL_SECONDS,
            payload: Value::Object(payload),
            secret: &config.token_secret,
        }) {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(%error, "could not encode the redirect token");
                if config.required {
                    control.deny(DENY_IDV_CONFIGURATION_ERROR);
                    return Outcome::Denied(DENY_IDV_CONFIGURATION_ERROR);
                }
                return Outcome::Skipped;
            }
        };

        control.send_user_to(
            &format!("https://{}/id-verification", config.domain),
            &[(REDIRECT_TOKEN_PARAMETER, token.as_str())],
        );
        Outcome::Redirected
    }

    /// Continuation pass, invoked when the verification service sends the
    /// user agent back.
    #[tracing::instrument(name = "IdentityVerificationHandler::resume", skip_all)]
    pub async fn resume<C>(&self, event: &LoginEvent, control: &C) -> Outcome
    where
        C: TokenClaims + AccessControl + RedirectFlow + UserMetadataStore,
    {
        let required = IdvConfig::required(event);

        let Some(token_secret) = event.secret("TOKEN_SECRET") else {
            tracing::warn!("missing token secret on continuation");
            if required {
                control.deny(DENY_IDV_VERIFICATION_FAILED);
                return Outcome::Denied(DENY_IDV_VERIFICATION_FAILED);
            }
            return Outcome::Skipped;
        };

        let claims = match control.validate_token(ValidateTokenRequest {
            secret: token_secret,
            token_parameter_name: REDIRECT_TOKEN_PARAMETER,
        }) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::warn!(%error, "failed to validate the verification token");
                if required {
                    control.deny(DENY_IDV_VERIFICATION_FAILED);
                    return Outcome::Denied(DENY_IDV_VERIFICATION_FAILED);
                }
                return Outcome::Skipped;
            }
        };

        let subject = claims.get("sub").and_then(Value::as_str).map(str::to_owned);
        let status = claims
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let last_check = claims.get("iat").and_then(Value::as_i64);

        if status.as_deref() == Some(IDV_STATUS_SUCCESS) {
            let mut stored = Map::new();
            if let Some(id) = &subject {
                stored.insert("id".to_string(), Value::String(id.clone()));
            }
            if let Some(checked_at) = last_check {
                stored.insert("lastSuccessfulCheck".to_string(), Value::from(checked_at));
            }
            control.set_app_metadata(METADATA_NAMESPACE, Value::Object(stored));
        } else if required {
            control.deny(DENY_IDV_VERIFICATION_FAILED);
            return Outcome::Denied(DENY_IDV_VERIFICATION_FAILED);
        }

        // Claim order is part of the contract: status, last-check, id.
        control.set_custom_claim(IDV_STATUS_CLAIM, status.map(Value::from).unwrap_or(Value::Null));
        control.set_custom_claim(
            IDV_LAST_CHECK_CLAIM,
            last_check.map(Value::from).unwrap_or(Value::Null),
        );
        control.set_custom_claim(IDV_ID_CLAIM, subject.map(Value::from).unwrap_or(Value::Null));
        Outcome::Completed
    }
}
