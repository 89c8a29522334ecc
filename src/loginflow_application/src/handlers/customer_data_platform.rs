use std::collections::BTreeMap;

use loginflow_core::{
    ApiCredentials, IntegrationApi, LoginEvent,
    contract::SKIPPED_PROTOCOLS,
    identity_providers::cdp_provider_name,
    payloads::{
        ApplicationAttributes, EventAttributes, EventLocation, LoginEventPayload, LoginKind,
        UserAttributes, UserIdentities,
    },
};
use secrecy::Secret;

use crate::outcome::Outcome;

/// Configuration for the customer-data-platform export, drawn from the
/// event's secrets and configuration bags.
pub struct CdpConfig {
    pub credentials: ApiCredentials,
}

impl CdpConfig {
    /// Returns `None` when the API key secret is absent; the handler then
    /// exits without blocking the login.
    pub fn from_event(event: &LoginEvent) -> Option<Self> {
        let api_key: Secret<String> = event.secret("CDP_API_KEY")?.clone();
        let mut credentials = ApiCredentials::new(api_key);
        if let Some(base_url) = event.config("CDP_BASE_URL") {
            credentials = credentials.with_base_url(base_url);
        }
        Some(Self { credentials })
    }
}

/// Exports each interactive login to the customer-data platform as a
/// `registration` or `login` event. Fire-and-forget: a failed export
/// never blocks the login.
pub struct CustomerDataPlatformHandler<A>
where
    A: IntegrationApi,
{
    api: A,
}

impl<A> CustomerDataPlatformHandler<A>
where
    A: IntegrationApi,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    #[tracing::instrument(name = "CustomerDataPlatformHandler::execute", skip_all)]
    pub async fn execute(&self, event: &LoginEvent) -> Outcome {
        // Token-grant protocols follow an earlier login event; exporting
        // them would double count the user.
        if SKIPPED_PROTOCOLS.contains(&event.transaction.protocol.as_str()) {
            tracing::info!(
                protocol = %event.transaction.protocol,
                "login event export skipped for protocol"
            );
            return Outcome::Skipped;
        }

        let Some(config) = CdpConfig::from_event(event) else {
            tracing::info!("missing required configuration, skipping login event export");
            return Outcome::Skipped;
        };

        let payload = build_payload(event);

        if let Err(error) = self.api.send_login_event(&config.credentials, &payload).await {
            // Fail open: the export is best-effort.
            tracing::warn!(%error, "login event export failed");
        }

        Outcome::Completed
    }
}

fn build_payload(event: &LoginEvent) -> LoginEventPayload {
    let providers: BTreeMap<String, String> = event
        .user
        .identities
        .iter()
        .filter_map(|identity| {
            cdp_provider_name(&identity.provider)
                .map(|name| (name.to_string(), identity.user_id.clone()))
        })
        .collect();

    LoginEventPayload {
        events_attributes: EventAttributes {
            name: LoginKind::from_logins_count(event.stats.logins_count),
        },
        user_attributes: UserAttributes {
            first_name: event.user.given_name.clone(),
            last_name: event.user.family_name.clone(),
            phone_number: event.user.phone_number.clone(),
        },
        user_identities: UserIdentities {
            email: event.user.email.clone(),
            auth0_user_id: event.user.user_id.clone(),
            providers,
        },
        application_attributes: ApplicationAttributes {
            name: event.client.name.clone(),
        },
        ip: event.request.ip.clone(),
        location: event
            .request
            .geoip
            .as_ref()
            .map(EventLocation::from)
            .unwrap_or_default(),
    }
}
