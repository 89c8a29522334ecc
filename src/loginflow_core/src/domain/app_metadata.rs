//! Typed projections of the app metadata handlers persist under
//! [`crate::domain::contract::METADATA_NAMESPACE`].

use serde::{Deserialize, Serialize};

/// Metadata written by the link-identity handler. A present `id` makes
/// later invocations skip the outbound call entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedIdentityMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Metadata written by the identity-verification continuation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdvMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unix timestamp of the last successful verification.
    #[serde(
        rename = "lastSuccessfulCheck",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_successful_check: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn idv_metadata_uses_the_stored_key_names() {
        let metadata: IdvMetadata =
            serde_json::from_value(json!({ "id": "idv-1", "lastSuccessfulCheck": 1700000000 }))
                .unwrap();
        assert_eq!(metadata.id.as_deref(), Some("idv-1"));
        assert_eq!(metadata.last_successful_check, Some(1700000000));

        let round_tripped = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            round_tripped,
            json!({ "id": "idv-1", "lastSuccessfulCheck": 1700000000 })
        );
    }

    #[test]
    fn absent_fields_are_omitted_when_serialized() {
        let value = serde_json::to_value(LinkedIdentityMetadata { id: None }).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
