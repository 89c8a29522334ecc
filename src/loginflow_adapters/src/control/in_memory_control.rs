use std::collections::HashMap;
use std::sync::Mutex;

use loginflow_core::{
    AccessControl, EncodeTokenRequest, RedirectFlow, RedirectFlowError, TokenClaims,
    UserMetadataStore, ValidateTokenRequest,
};
use serde_json::Value;

use crate::redirect::{decode_redirect_token, encode_redirect_token};

/// In-memory control surface. Stands in for the hosting platform's
/// capability object in integration tests and local harnesses; records
/// every mutation in call order and signs real redirect tokens.
pub struct InMemoryControl {
    redirect_allowed: bool,
    /// Query parameters the continuation arrived with.
    query: HashMap<String, String>,
    claims: Mutex<Vec<(String, Value)>>,
    denials: Mutex<Vec<String>>,
    metadata: Mutex<Vec<(String, Value)>>,
    redirects: Mutex<Vec<RecordedRedirect>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRedirect {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Default for InMemoryControl {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryControl {
    pub fn new() -> Self {
        Self {
            redirect_allowed: true,
            query: HashMap::new(),
            claims: Mutex::new(Vec::new()),
            denials: Mutex::new(Vec::new()),
            metadata: Mutex::new(Vec::new()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// A control surface for a flow that cannot interrupt the user
    /// agent (refresh tokens, machine-to-machine).
    pub fn non_interactive() -> Self {
        Self {
            redirect_allowed: false,
            ..Self::new()
        }
    }

    /// A control surface for a continuation carrying the given query
    /// parameters.
    pub fn resuming_with_query(query: HashMap<String, String>) -> Self {
        Self {
            query,
            ..Self::new()
        }
    }

    pub fn claims(&self) -> Vec<(String, Value)> {
        self.claims.lock().unwrap().clone()
    }

    pub fn denials(&self) -> Vec<String> {
        self.denials.lock().unwrap().clone()
    }

    pub fn metadata(&self) -> Vec<(String, Value)> {
        self.metadata.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<RecordedRedirect> {
        self.redirects.lock().unwrap().clone()
    }
}

impl AccessControl for InMemoryControl {
    fn deny(&self, reason: &str) {
        self.denials.lock().unwrap().push(reason.to_string());
    }
}

impl TokenClaims for InMemoryControl {
    fn set_custom_claim(&self, name: &str, value: Value) {
        self.claims.lock().unwrap().push((name.to_string(), value));
    }
}

impl UserMetadataStore for InMemoryControl {
    fn set_app_metadata(&self, namespace: &str, value: Value) {
        self.metadata
            .lock()
            .unwrap()
            .push((namespace.to_string(), value));
    }
}

impl RedirectFlow for InMemoryControl {
    fn can_redirect(&self) -> bool {
        self.redirect_allowed
    }

    fn encode_token(&self, request: EncodeTokenRequest<'_>) -> Result<String, RedirectFlowError> {
        let payload = request.payload.as_object().cloned().ok_or_else(|| {
            RedirectFlowError::EncodingFailed("token payload must be a JSON object".to_string())
        })?;
        encode_redirect_token(&payload, request.expires_in_seconds, request.secret)
    }

    fn send_user_to(&self, url: &str, query: &[(&str, &str)]) {
        self.redirects.lock().unwrap().push(RecordedRedirect {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });
    }

    fn validate_token(
        &self,
        request: ValidateTokenRequest<'_>,
    ) -> Result<Value, RedirectFlowError> {
        let token = self
            .query
            .get(request.token_parameter_name)
            .ok_or(RedirectFlowError::InvalidToken)?;
        decode_redirect_token(token, request.secret)
    }
}
