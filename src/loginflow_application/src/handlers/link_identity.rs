use loginflow_core::{
    ApiCredentials, IntegrationApi, LinkedIdentityMetadata, LoginEvent, TokenClaims,
    UserMetadataStore,
    contract::{LINK_ID_CLAIM, METADATA_NAMESPACE},
    payloads::LinkIdentityPayload,
};
use serde_json::{Value, json};

use crate::outcome::Outcome;

/// Configuration for the link-identity integration.
pub struct LinkIdentityConfig {
    pub credentials: ApiCredentials,
}

impl LinkIdentityConfig {
    pub fn from_event(event: &LoginEvent) -> Option<Self> {
        let api_key = event.secret("API_KEY")?.clone();
        let mut credentials = ApiCredentials::new(api_key);
        if let Some(base_url) = event.config("API_BASE_URL") {
            credentials = credentials.with_base_url(base_url);
        }
        Some(Self { credentials })
    }
}

/// Links the user to an external identity once, then replays the stored
/// id as a claim on every later login without calling out again.
pub struct LinkIdentityHandler<A>
where
    A: IntegrationApi,
{
    api: A,
}

impl<A> LinkIdentityHandler<A>
where
    A: IntegrationApi,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    #[tracing::instrument(name = "LinkIdentityHandler::execute", skip_all)]
    pub async fn execute<C>(&self, event: &LoginEvent, control: &C) -> Outcome
    where
        C: TokenClaims + UserMetadataStore,
    {
        let Some(config) = LinkIdentityConfig::from_event(event) else {
            tracing::info!("missing required configuration, skipping identity link");
            return Outcome::Skipped;
        };

        // Idempotence: a previously persisted id short-circuits the
        // outbound call entirely.
        let stored: LinkedIdentityMetadata = event
            .user
            .namespaced_metadata(METADATA_NAMESPACE)
            .unwrap_or_default();
        if let Some(id) = stored.id {
            control.set_custom_claim(LINK_ID_CLAIM, Value::String(id));
            return Outcome::Completed;
        }

        let payload = LinkIdentityPayload {
            user_email: event.user.email.clone(),
            user_email_verified: event.user.email_verified,
            user_phone: event.user.phone_number.clone(),
            user_phone_verified: event.user.phone_verified,
            user_auth0_id: event.user.user_id.clone(),
        };

        let linked = match self.api.link_identity(&config.credentials, &payload).await {
            Ok(linked) => linked,
            Err(error) => {
                // Fail open: the link is retried on the next login.
                tracing::warn!(%error, "link identity call failed");
                return Outcome::Completed;
            }
        };

        control.set_custom_claim(LINK_ID_CLAIM, Value::String(linked.id.clone()));
        control.set_app_metadata(METADATA_NAMESPACE, json!({ "id": linked.id }));
        Outcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{RecordingControl, sample_event, with_secret};
    use loginflow_core::{
        IntegrationApiError, LinkedIdentity,
        payloads::{LoginEventPayload, RiskAssessment, RiskPayload},
    };
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct MockApi {
        result: Arc<Mutex<Result<LinkedIdentity, IntegrationApiError>>>,
        calls: Arc<Mutex<Vec<LinkIdentityPayload>>>,
    }

    impl MockApi {
        fn returning_id(id: &str) -> Self {
            Self {
                result: Arc::new(Mutex::new(Ok(LinkedIdentity { id: id.to_string() }))),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                result: Arc::new(Mutex::new(Err(IntegrationApiError::Transport(
                    "connection refused".to_string(),
                )))),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl IntegrationApi for MockApi {
        async fn send_login_event(
            &self,
            _credentials: &ApiCredentials,
            _payload: &LoginEventPayload,
        ) -> Result<(), IntegrationApiError> {
            unimplemented!()
        }

        async fn link_identity(
            &self,
            _credentials: &ApiCredentials,
            payload: &LinkIdentityPayload,
        ) -> Result<LinkedIdentity, IntegrationApiError> {
            self.calls.lock().unwrap().push(payload.clone());
            match &*self.result.lock().unwrap() {
                Ok(linked) => Ok(linked.clone()),
                Err(_) => Err(IntegrationApiError::Transport(
                    "connection refused".to_string(),
                )),
            }
        }

        async fn score_login(
            &self,
            _credentials: &ApiCredentials,
            _payload: &RiskPayload,
        ) -> Result<RiskAssessment, IntegrationApiError> {
            unimplemented!()
        }
    }

    fn configured_event() -> LoginEvent {
        with_secret(sample_event(), "API_KEY", "link-key")
    }

    #[tokio::test]
    async fn skips_when_config_is_missing() {
        let api = MockApi::returning_id("ext-1");
        let handler = LinkIdentityHandler::new(api.clone());
        let control = RecordingControl::default();

        let outcome = handler.execute(&sample_event(), &control).await;

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(api.call_count(), 0);
        assert!(control.claims().is_empty());
    }

    #[tokio::test]
    async fn links_and_persists_the_returned_id() {
        use fake::{Fake, faker::internet::en::SafeEmail};

        let api = MockApi::returning_id("ext-42");
        let handler = LinkIdentityHandler::new(api.clone());
        let control = RecordingControl::default();

        let email: String = SafeEmail().fake();
        let mut event = configured_event();
        event.user.email = Some(email.clone());

        let outcome = handler.execute(&event, &control).await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(api.call_count(), 1);

        let sent = api.calls.lock().unwrap();
        assert_eq!(sent[0].user_auth0_id, "auth0|507f1f77bcf86cd799439011");
        assert_eq!(sent[0].user_email.as_deref(), Some(email.as_str()));

        assert_eq!(
            control.claims(),
            vec![(LINK_ID_CLAIM.to_string(), Value::from("ext-42"))]
        );
        assert_eq!(
            control.metadata(),
            vec![(METADATA_NAMESPACE.to_string(), json!({ "id": "ext-42" }))]
        );
    }

    #[tokio::test]
    async fn a_stored_id_short_circuits_the_outbound_call() {
        let api = MockApi::returning_id("ext-1");
        let handler = LinkIdentityHandler::new(api.clone());
        let control = RecordingControl::default();

        let mut event = configured_event();
        event
            .user
            .app_metadata
            .insert(METADATA_NAMESPACE.to_string(), json!({ "id": "cached-7" }));

        let outcome = handler.execute(&event, &control).await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(api.call_count(), 0);
        assert_eq!(
            control.claims(),
            vec![(LINK_ID_CLAIM.to_string(), Value::from("cached-7"))]
        );
        assert!(control.metadata().is_empty());
    }

    #[tokio::test]
    async fn a_failed_call_does_not_block_the_login() {
        let api = MockApi::failing();
        let handler = LinkIdentityHandler::new(api.clone());
        let control = RecordingControl::default();

        let outcome = handler.execute(&configured_event(), &control).await;

        assert_eq!(outcome, Outcome::Completed);
        assert!(control.claims().is_empty());
        assert!(control.metadata().is_empty());
        assert!(control.denials().is_empty());
    }
}
