//! Control-surface ports. The hosting platform hands each handler one
//! capability object; these traits split it so every handler depends
//! only on the capabilities it actually uses.

use secrecy::Secret;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedirectFlowError {
    /// The inbound token is missing, malformed, expired or carries a bad
    /// signature. Deliberately generic: callers only branch on failure.
    #[error("Redirect token is missing or invalid")]
    InvalidToken,
    #[error("Failed to encode redirect token: {0}")]
    EncodingFailed(String),
}

/// Blocks the current login with a fixed reason code. Once denied, the
/// platform ignores any further annotations for this attempt.
pub trait AccessControl: Send + Sync {
    fn deny(&self, reason: &str);
}

/// Sets named claims on the token issued for this login. Claim order is
/// observable by relying applications and matches call order.
pub trait TokenClaims: Send + Sync {
    fn set_custom_claim(&self, name: &str, value: Value);
}

/// Persists namespaced metadata against the user, visible to future
/// invocations through `LoginEvent::user::app_metadata`.
pub trait UserMetadataStore: Send + Sync {
    fn set_app_metadata(&self, namespace: &str, value: Value);
}

pub struct EncodeTokenRequest<'a> {
    pub expires_in_seconds: i64,
    /// JSON object embedded into the token alongside iat/exp.
    pub payload: Value,
    pub secret: &'a Secret<String>,
}

pub struct ValidateTokenRequest<'a> {
    pub secret: &'a Secret<String>,
    pub token_parameter_name: &'a str,
}

/// Interactive-redirect capability for two-phase handlers.
pub trait RedirectFlow: Send + Sync {
    /// Whether the current transaction can interrupt the user agent.
    /// Non-interactive flows (refresh tokens, machine-to-machine) cannot.
    fn can_redirect(&self) -> bool;

    /// Sign a short-lived token for the outbound redirect.
    fn encode_token(&self, request: EncodeTokenRequest<'_>) -> Result<String, RedirectFlowError>;

    /// Send the user agent to `url` with the given query parameters.
    fn send_user_to(&self, url: &str, query: &[(&str, &str)]);

    /// Validate the signed token the continuation arrived with and
    /// return its claims as a JSON object.
    fn validate_token(&self, request: ValidateTokenRequest<'_>)
    -> Result<Value, RedirectFlowError>;
}
