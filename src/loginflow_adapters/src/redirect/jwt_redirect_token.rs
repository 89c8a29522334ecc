//! Compact signed-token codec for the identity-verification redirect.
//! HS256 over the shared token secret, with iat/exp stamped alongside
//! the caller's payload. Both directions of the redirect use this shape.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use loginflow_core::RedirectFlowError;
use secrecy::{ExposeSecret, Secret};
use serde_json::{Map, Value};

/// Sign `payload` into a compact token that expires `expires_in_seconds`
/// from now.
pub fn encode_redirect_token(
    payload: &Map<String, Value>,
    expires_in_seconds: i64,
    secret: &Secret<String>,
) -> Result<String, RedirectFlowError> {
    let now = Utc::now().timestamp();

    let mut claims = payload.clone();
    claims.insert("iat".to_string(), Value::from(now));
    claims.insert("exp".to_string(), Value::from(now + expires_in_seconds));

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|error| RedirectFlowError::EncodingFailed(error.to_string()))
}

/// Verify signature and expiry, returning the token's claims. All
/// failure causes collapse into the generic invalid-token error.
pub fn decode_redirect_token(
    token: &str,
    secret: &Secret<String>,
) -> Result<Value, RedirectFlowError> {
    decode::<Value>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| RedirectFlowError::InvalidToken)
}
