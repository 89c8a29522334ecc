//! Shared hand-rolled control-surface double for handler tests. Records
//! every mutation in call order so tests can assert ordering contracts.

use std::collections::HashMap;
use std::sync::Mutex;

use loginflow_core::{
    AccessControl, EncodeTokenRequest, LoginEvent, RedirectFlow, RedirectFlowError, TokenClaims,
    UserMetadataStore, ValidateTokenRequest,
};
use secrecy::Secret;
use serde_json::Value;

pub struct RecordingControl {
    pub redirect_allowed: bool,
    /// Claims returned from `validate_token`; `None` simulates an
    /// invalid or missing continuation token.
    pub validated_claims: Option<Value>,
    pub claims: Mutex<Vec<(String, Value)>>,
    pub denials: Mutex<Vec<String>>,
    pub metadata: Mutex<Vec<(String, Value)>>,
    pub redirects: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub encoded_tokens: Mutex<Vec<(i64, Value)>>,
}

impl Default for RecordingControl {
    fn default() -> Self {
        Self {
            redirect_allowed: true,
            validated_claims: None,
            claims: Mutex::new(Vec::new()),
            denials: Mutex::new(Vec::new()),
            metadata: Mutex::new(Vec::new()),
            redirects: Mutex::new(Vec::new()),
            encoded_tokens: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingControl {
    pub fn claims(&self) -> Vec<(String, Value)> {
        self.claims.lock().unwrap().clone()
    }

    pub fn denials(&self) -> Vec<String> {
        self.denials.lock().unwrap().clone()
    }

    pub fn metadata(&self) -> Vec<(String, Value)> {
        self.metadata.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.redirects.lock().unwrap().clone()
    }
}

impl AccessControl for RecordingControl {
    fn deny(&self, reason: &str) {
        self.denials.lock().unwrap().push(reason.to_string());
    }
}

impl TokenClaims for RecordingControl {
    fn set_custom_claim(&self, name: &str, value: Value) {
        self.claims.lock().unwrap().push((name.to_string(), value));
    }
}

impl UserMetadataStore for RecordingControl {
    fn set_app_metadata(&self, namespace: &str, value: Value) {
        self.metadata
            .lock()
            .unwrap()
            .push((namespace.to_string(), value));
    }
}

impl RedirectFlow for RecordingControl {
    fn can_redirect(&self) -> bool {
        self.redirect_allowed
    }

    fn encode_token(&self, request: EncodeTokenRequest<'_>) -> Result<String, RedirectFlowError> {
        self.encoded_tokens
            .lock()
            .unwrap()
            .push((request.expires_in_seconds, request.payload));
        Ok("stub.redirect.token".to_string())
    }

    fn send_user_to(&self, url: &str, query: &[(&str, &str)]) {
        let query = query
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.redirects.lock().unwrap().push((url.to_string(), query));
    }

    fn validate_token(
        &self,
        _request: ValidateTokenRequest<'_>,
    ) -> Result<Value, RedirectFlowError> {
        self.validated_claims
            .clone()
            .ok_or(RedirectFlowError::InvalidToken)
    }
}

/// A populated event the way the platform would deliver it, without any
/// integration secrets configured.
pub fn sample_event() -> LoginEvent {
    let mut event = LoginEvent::default();
    event.transaction.protocol = "oidc-basic-profile".to_string();
    event.client.name = "Example App".to_string();
    event.user.user_id = "auth0|507f1f77bcf86cd799439011".to_string();
    event.user.email = Some("jane.doe@example.com".to_string());
    event.user.email_verified = true;
    event.user.phone_number = Some("+4712345678".to_string());
    event.user.given_name = Some("Jane".to_string());
    event.user.family_name = Some("Doe".to_string());
    event.stats.logins_count = 4;
    event.request.ip = "203.0.113.7".to_string();
    event.request.user_agent = "Mozilla/5.0 (test)".to_string();
    event.request.geoip = Some(loginflow_core::GeoIp {
        latitude: Some(59.91),
        longitude: Some(10.75),
        country_code: Some("NO".to_string()),
        city_name: Some("Oslo".to_string()),
    });
    event
}

pub fn with_secret(mut event: LoginEvent, key: &str, value: &str) -> LoginEvent {
    event
        .secrets
        .insert(key.to_string(), Secret::from(value.to_owned()));
    event
}

pub fn with_config(mut event: LoginEvent, key: &str, value: &str) -> LoginEvent {
    event
        .configuration
        .insert(key.to_string(), value.to_string());
    event
}
